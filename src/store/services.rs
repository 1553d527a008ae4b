//! Service catalog persistence.
//!
//! A [`Service`] is assembled from five tables. Children are loaded ordered by id, which
//! makes "first active rule of a type" deterministic.

use crate::{
    core::catalog::{
        ItemType, PackageItem, PricingRule, RuleType, Service, ServiceAddon, ServicePackage,
    },
    entities::{
        PackageItem as PackageItemEntity, ServiceAddon as ServiceAddonEntity, ServiceEntity,
        ServicePackage as ServicePackageEntity, ServicePricingRule as ServicePricingRuleEntity,
        package_item, service, service_addon, service_package, service_pricing_rule,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{instrument, warn};

fn rule_from_model(model: service_pricing_rule::Model) -> Option<PricingRule> {
    let rule_type = match RuleType::parse(&model.rule_type) {
        Ok(rule_type) => rule_type,
        Err(err) => {
            warn!(rule_id = %model.id, %err, "Skipping pricing rule");
            return None;
        }
    };
    Some(PricingRule {
        id: model.id,
        rule_type,
        base_unit: model.base_unit,
        base_price: model.base_price,
        additional_unit_price: model.additional_unit_price.unwrap_or(0.0),
        minimum_units: model.minimum_units,
        maximum_units: model.maximum_units,
        is_active: model.is_active,
    })
}

fn item_from_model(model: package_item::Model) -> PackageItem {
    PackageItem {
        item_type: ItemType::from_label(&model.item_type),
        id: model.id,
        name: model.item_name,
        quantity: model.quantity,
        unit_type: model.unit_type,
        unit_value: model.unit_value,
    }
}

/// Loads a service with its packages, items, add-ons and pricing rules.
///
/// Rules with an unrecognized type are logged and left out.
///
/// # Errors
/// Returns [`Error::ServiceNotFound`] if no such service exists, or a database error.
#[instrument(skip(db))]
pub async fn load_service(db: &DatabaseConnection, service_id: &str) -> Result<Service> {
    let model = ServiceEntity::find_by_id(service_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ServiceNotFound {
            id: service_id.to_string(),
        })?;

    let package_models = ServicePackageEntity::find()
        .filter(service_package::Column::ServiceId.eq(service_id))
        .order_by_asc(service_package::Column::Id)
        .all(db)
        .await?;

    let package_ids: Vec<String> = package_models.iter().map(|p| p.id.clone()).collect();
    let item_models = if package_ids.is_empty() {
        Vec::new()
    } else {
        PackageItemEntity::find()
            .filter(package_item::Column::PackageId.is_in(package_ids))
            .order_by_asc(package_item::Column::Id)
            .all(db)
            .await?
    };

    let packages = package_models
        .into_iter()
        .map(|package| ServicePackage {
            items: item_models
                .iter()
                .filter(|item| item.package_id == package.id)
                .cloned()
                .map(item_from_model)
                .collect(),
            id: package.id,
            name: package.package_name,
            base_price: package.base_price,
            is_default: package.is_default,
        })
        .collect();

    let addons = ServiceAddonEntity::find()
        .filter(service_addon::Column::ServiceId.eq(service_id))
        .order_by_asc(service_addon::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|addon| ServiceAddon {
            id: addon.id,
            name: addon.addon_name,
            price: addon.addon_price,
        })
        .collect();

    let pricing_rules = ServicePricingRuleEntity::find()
        .filter(service_pricing_rule::Column::ServiceId.eq(service_id))
        .order_by_asc(service_pricing_rule::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter_map(rule_from_model)
        .collect();

    Ok(Service {
        id: model.id,
        vendor_id: model.vendor_id,
        name: model.service_name,
        service_type: model.service_type,
        base_price: model.base_price,
        minimum_price: model.minimum_price,
        maximum_price: model.maximum_price,
        packages,
        addons,
        pricing_rules,
    })
}

/// Loads several services, in the order of `service_ids`.
///
/// # Errors
/// Fails on the first missing service or database error.
pub async fn load_services(db: &DatabaseConnection, service_ids: &[String]) -> Result<Vec<Service>> {
    let mut services = Vec::with_capacity(service_ids.len());
    for id in service_ids {
        services.push(load_service(db, id).await?);
    }
    Ok(services)
}

/// Validates a service and inserts it with its whole catalog in one transaction.
///
/// # Errors
/// Returns [`Error::InvalidCatalog`] if validation fails, or a database error.
#[instrument(skip(db, service), fields(service_id = %service.id))]
pub async fn save_service(db: &DatabaseConnection, service: &Service) -> Result<()> {
    service.validate()?;

    let txn = db.begin().await?;

    ServiceEntity::insert(service::ActiveModel {
        id: Set(service.id.clone()),
        vendor_id: Set(service.vendor_id.clone()),
        service_name: Set(service.name.clone()),
        service_type: Set(service.service_type.clone()),
        base_price: Set(service.base_price),
        minimum_price: Set(service.minimum_price),
        maximum_price: Set(service.maximum_price),
    })
    .exec(&txn)
    .await?;

    for package in &service.packages {
        ServicePackageEntity::insert(service_package::ActiveModel {
            id: Set(package.id.clone()),
            service_id: Set(service.id.clone()),
            package_name: Set(package.name.clone()),
            base_price: Set(package.base_price),
            is_default: Set(package.is_default),
        })
        .exec(&txn)
        .await?;

        for item in &package.items {
            PackageItemEntity::insert(package_item::ActiveModel {
                id: Set(item.id.clone()),
                package_id: Set(package.id.clone()),
                item_type: Set(item.item_type.as_label().to_string()),
                item_name: Set(item.name.clone()),
                quantity: Set(item.quantity),
                unit_type: Set(item.unit_type.clone()),
                unit_value: Set(item.unit_value),
            })
            .exec(&txn)
            .await?;
        }
    }

    for addon in &service.addons {
        ServiceAddonEntity::insert(service_addon::ActiveModel {
            id: Set(addon.id.clone()),
            service_id: Set(service.id.clone()),
            addon_name: Set(addon.name.clone()),
            addon_price: Set(addon.price),
        })
        .exec(&txn)
        .await?;
    }

    for rule in &service.pricing_rules {
        ServicePricingRuleEntity::insert(service_pricing_rule::ActiveModel {
            id: Set(rule.id.clone()),
            service_id: Set(service.id.clone()),
            rule_type: Set(rule.rule_type.as_label().to_string()),
            base_unit: Set(rule.base_unit),
            base_price: Set(rule.base_price),
            additional_unit_price: Set(Some(rule.additional_unit_price)),
            minimum_units: Set(rule.minimum_units),
            maximum_units: Set(rule.maximum_units),
            is_active: Set(rule.is_active),
        })
        .exec(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(())
}
