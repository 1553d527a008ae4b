//! Database configuration module.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{
    BookingEntity, PackageItem, ServiceAddon, ServiceEntity, ServicePackage, ServicePricingRule,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/wedding_bookings.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database: {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates every table from the entity definitions.
///
/// Creation is skipped for tables that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(ServiceEntity),
        schema.create_table_from_entity(ServicePackage),
        schema.create_table_from_entity(PackageItem),
        schema.create_table_from_entity(ServiceAddon),
        schema.create_table_from_entity(ServicePricingRule),
        schema.create_table_from_entity(BookingEntity),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    info!("Database tables are ready");
    Ok(())
}
