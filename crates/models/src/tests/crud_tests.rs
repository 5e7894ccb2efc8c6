use crate::db::{connect_and_migrate, test_connection, DatabaseConfig};
use crate::{bloc, chambre, foyer};
use crate::chambre::TypeChambre;
use sea_orm::{DatabaseConnection, EntityTrait};
use anyhow::Result;
use uuid::Uuid;

/// Setup test database with migrations, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        println!("Skipping database tests (SKIP_DB_TESTS is set)");
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;
    cfg.connect_timeout_secs = 3;
    cfg.acquire_timeout_secs = 3;
    match connect_and_migrate(&cfg).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            None
        }
    }
}

fn unique_numero() -> i64 {
    (Uuid::new_v4().as_u128() % 1_000_000_000) as i64
}

#[tokio::test]
async fn test_foyer_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    test_connection(&db).await?;

    let nom = format!("foyer_{}", Uuid::new_v4());
    let created = foyer::create(&db, &nom, 300).await?;
    assert_eq!(created.nom_foyer, nom);

    let found = foyer::find_by_nom(&db, &nom).await?;
    assert_eq!(found.map(|f| f.id_foyer), Some(created.id_foyer));

    foyer::hard_delete(&db, created.id_foyer).await?;
    assert!(foyer::find_by_nom(&db, &nom).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_bloc_upsert_inserts_then_overwrites() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let nom = format!("bloc_{}", Uuid::new_v4());
    let inserted = bloc::upsert(&db, None, &nom, 100, None).await?;
    assert_eq!(inserted.nom_bloc, nom);
    assert_eq!(inserted.foyer_id, None);

    let f = foyer::create(&db, &format!("foyer_{}", Uuid::new_v4()), 50).await?;
    let updated = bloc::upsert(&db, Some(inserted.id_bloc), &nom, 120, Some(f.id_foyer)).await?;
    assert_eq!(updated.id_bloc, inserted.id_bloc);
    assert_eq!(updated.capacite_bloc, 120);
    assert_eq!(updated.foyer_id, Some(f.id_foyer));

    let by_name = bloc::find_by_nom(&db, &nom).await?;
    assert_eq!(by_name.map(|b| b.capacite_bloc), Some(120));

    bloc::hard_delete(&db, inserted.id_bloc).await?;
    foyer::hard_delete(&db, f.id_foyer).await?;
    assert!(bloc::Entity::find_by_id(inserted.id_bloc).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_deleting_bloc_row_detaches_chambres() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let b = bloc::upsert(&db, None, &format!("bloc_{}", Uuid::new_v4()), 10, None).await?;
    let c = chambre::upsert(&db, None, unique_numero(), TypeChambre::Double, Some(b.id_bloc)).await?;
    assert_eq!(chambre::list_for_blocs(&db, &[b.id_bloc]).await?.len(), 1);

    bloc::hard_delete(&db, b.id_bloc).await?;
    let after = chambre::Entity::find_by_id(c.id_chambre).one(&db).await?;
    let after = after.expect("chambre survives its bloc");
    assert_eq!(after.bloc_id, None);
    assert_eq!(after.type_chambre, "DOUBLE");

    chambre::hard_delete(&db, c.id_chambre).await?;
    Ok(())
}
