//! Authoring lifecycle: catalog, prices, groups, templates and projects

mod common;

use common::*;
use fpack_service::contract::*;
use fpack_service::Config;
use rust_decimal_macros::dec;

fn dependent<'a>(error: &'a FpackError, relation: &str) -> Option<&'a Dependent> {
    match error {
        FpackError::DependentsExist { dependents, .. } => {
            dependents.iter().find(|d| d.relation == relation)
        }
        _ => None,
    }
}

// ===== Catalog =====

#[tokio::test]
async fn test_supplier_names_are_unique() {
    let (service, _store) = create_service();
    service.create_supplier("Festo").await.unwrap();

    let result = service.create_supplier("Festo").await;
    assert!(matches!(result, Err(FpackError::Conflict { .. })));
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let (service, _store) = create_service();
    assert!(matches!(
        service.create_client("   ").await,
        Err(FpackError::Validation { .. })
    ));
    assert!(matches!(
        service.create_group("").await,
        Err(FpackError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_product_requires_existing_supplier() {
    let (service, _store) = create_service();
    let result = service.create_product(new_product("Orphan", 77)).await;
    assert!(matches!(
        result,
        Err(FpackError::NotFound { resource, .. }) if resource == "supplier"
    ));
}

#[tokio::test]
async fn test_product_reference_length_is_bounded() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    let mut product = new_product("Long", c.supplier.id);
    product.reference = "X".repeat(61);
    assert!(matches!(
        service.create_product(product).await,
        Err(FpackError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_product_appends_suffix() {
    let (service, _store) = create_service_with(Config {
        copy_suffix: " - copie".to_string(),
        ..Config::default()
    });
    let c = seed_catalog(&service).await;
    service
        .create_price(c.p1.id, c.client.id, price(dec!(1), dec!(0)))
        .await
        .unwrap();

    let copy = service.duplicate_product(c.p1.id).await.unwrap();
    assert_ne!(copy.id, c.p1.id);
    assert_eq!(copy.name, "Gripper - copie");
    assert_eq!(copy.reference, c.p1.reference);
    // Prices stay with the original
    assert!(service.get_price(copy.id, c.client.id).await.is_err());
}

#[tokio::test]
async fn test_product_deletion_reports_every_relation() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    let kit = service.create_equipment(new_equipment("Kit")).await.unwrap();
    service.set_composition_row(kit.id, c.p1.id, 2).await.unwrap();
    service
        .create_price(c.p1.id, c.client.id, price(dec!(4), dec!(1)))
        .await
        .unwrap();
    service.add_incompatibility(c.p1.id, c.p2.id).await.unwrap();
    let group = service.create_group("Grippers").await.unwrap();
    service
        .add_group_item(group.id, ItemKind::Product, c.p1.id, ItemStatus::Optional)
        .await
        .unwrap();
    let template = service
        .create_template(template_for("Line A", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();

    let error = service.delete_product(c.p1.id).await.unwrap_err();

    assert_eq!(dependent(&error, "equipment").unwrap().names, vec!["Kit"]);
    assert_eq!(dependent(&error, "prices").unwrap().count, 1);
    assert_eq!(
        dependent(&error, "incompatibilities").unwrap().names,
        vec!["Vacuum cup"]
    );
    assert_eq!(dependent(&error, "groups").unwrap().names, vec!["Grippers"]);
    assert_eq!(
        dependent(&error, "template_columns").unwrap().names,
        vec!["Line A"]
    );
    assert!(service.get_product(c.p1.id).await.is_ok());

    // A product nothing references goes away
    service.delete_product(c.p3.id).await.unwrap();
    assert!(matches!(
        service.get_product(c.p3.id).await,
        Err(FpackError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_supplier_and_client_deletion_is_guarded() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    service
        .create_robot(new_robot("Picker", c.client.id))
        .await
        .unwrap();

    let error = service.delete_supplier(c.supplier.id).await.unwrap_err();
    assert_eq!(dependent(&error, "products").unwrap().count, 3);

    let error = service.delete_client(c.client.id).await.unwrap_err();
    assert_eq!(dependent(&error, "robots").unwrap().names, vec!["Picker"]);

    service.delete_client(c.other_client.id).await.unwrap();
}

#[tokio::test]
async fn test_composition_rows() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let kit = service.create_equipment(new_equipment("Kit")).await.unwrap();

    service.set_composition_row(kit.id, c.p1.id, 2).await.unwrap();
    service.set_composition_row(kit.id, c.p2.id, 1).await.unwrap();
    // Setting an existing row replaces its quantity
    service.set_composition_row(kit.id, c.p1.id, 5).await.unwrap();

    let rows = service.get_composition(kit.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows.iter().find(|r| r.product_id == c.p1.id).unwrap().quantity,
        5
    );

    assert!(matches!(
        service.set_composition_row(kit.id, c.p3.id, 0).await,
        Err(FpackError::Validation { .. })
    ));
    assert!(matches!(
        service.remove_composition_row(kit.id, c.p3.id).await,
        Err(FpackError::NotFound { .. })
    ));

    service.remove_composition_row(kit.id, c.p2.id).await.unwrap();
    assert_eq!(service.clear_composition(kit.id).await.unwrap(), 1);
    assert!(service.get_composition(kit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_incompatibilities_are_symmetric() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    let pair = service.add_incompatibility(c.p3.id, c.p1.id).await.unwrap();
    assert_eq!(pair.product_a, c.p1.id.min(c.p3.id));

    let of_p1 = service.incompatible_products(c.p1.id).await.unwrap();
    let of_p3 = service.incompatible_products(c.p3.id).await.unwrap();
    assert_eq!(of_p1.iter().map(|p| p.id).collect::<Vec<_>>(), vec![c.p3.id]);
    assert_eq!(of_p3.iter().map(|p| p.id).collect::<Vec<_>>(), vec![c.p1.id]);

    assert!(matches!(
        service.add_incompatibility(c.p2.id, c.p2.id).await,
        Err(FpackError::Validation { .. })
    ));

    service.remove_incompatibility(c.p1.id, c.p3.id).await.unwrap();
    assert!(service.list_incompatibilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_robot_deletion_takes_its_price() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Scara", c.client.id))
        .await
        .unwrap();
    service
        .create_robot_price(robot.id, price(dec!(18000), dec!(400)))
        .await
        .unwrap();

    service.delete_robot(robot.id).await.unwrap();
    assert!(service.list_robot_prices().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_robot_offered_by_group_cannot_be_deleted() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Delta", c.client.id))
        .await
        .unwrap();
    let group = service.create_group("Robots").await.unwrap();
    service
        .add_group_item(group.id, ItemKind::Robot, robot.id, ItemStatus::Standard)
        .await
        .unwrap();

    let error = service.delete_robot(robot.id).await.unwrap_err();
    assert_eq!(dependent(&error, "groups").unwrap().names, vec!["Robots"]);
}

#[tokio::test]
async fn test_negative_robot_payload_is_rejected() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let mut robot = new_robot("Broken", c.client.id);
    robot.payload = -1;
    assert!(matches!(
        service.create_robot(robot).await,
        Err(FpackError::Validation { .. })
    ));
}

// ===== Prices =====

#[tokio::test]
async fn test_price_pair_is_unique() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    service
        .create_price(c.p1.id, c.client.id, price(dec!(10), dec!(1)))
        .await
        .unwrap();
    assert!(matches!(
        service
            .create_price(c.p1.id, c.client.id, price(dec!(11), dec!(1)))
            .await,
        Err(FpackError::Conflict { .. })
    ));

    let updated = service
        .update_price(c.p1.id, c.client.id, price(dec!(11.25), dec!(1)))
        .await
        .unwrap();
    assert_eq!(updated.unit_price, dec!(11.25));
    assert_eq!(service.client_prices(c.client.id).await.unwrap().len(), 1);

    service.delete_price(c.p1.id, c.client.id).await.unwrap();
    assert!(matches!(
        service.get_price(c.p1.id, c.client.id).await,
        Err(FpackError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    assert!(matches!(
        service
            .create_price(c.p1.id, c.client.id, price(dec!(-0.01), dec!(0)))
            .await,
        Err(FpackError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_robot_price_is_unique_and_keeps_reference() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Cobot", c.client.id))
        .await
        .unwrap();

    let created = service
        .create_robot_price(robot.id, price(dec!(25000), dec!(500)))
        .await
        .unwrap();
    assert_eq!(created.reference, "R-COBOT");
    assert!(matches!(
        service
            .create_robot_price(robot.id, price(dec!(1), dec!(1)))
            .await,
        Err(FpackError::Conflict { .. })
    ));

    let updated = service
        .update_robot_price(robot.id, price(dec!(24000), dec!(500)))
        .await
        .unwrap();
    assert_eq!(updated.unit_price, dec!(24000));
    assert_eq!(updated.reference, "R-COBOT");
}

// ===== Groups =====

#[tokio::test]
async fn test_group_items_are_labelled_and_unique() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let group = service.create_group("End effector").await.unwrap();

    service
        .add_group_item(group.id, ItemKind::Product, c.p1.id, ItemStatus::Standard)
        .await
        .unwrap();
    assert!(matches!(
        service
            .add_group_item(group.id, ItemKind::Product, c.p1.id, ItemStatus::Optional)
            .await,
        Err(FpackError::Conflict { .. })
    ));
    assert!(matches!(
        service
            .add_group_item(group.id, ItemKind::Robot, 4_242, ItemStatus::Optional)
            .await,
        Err(FpackError::NotFound { resource, .. }) if resource == "robot"
    ));

    let items = service.group_items(group.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "Gripper");
    assert_eq!(items[0].item.status, ItemStatus::Standard);
}

#[tokio::test]
async fn test_group_item_removal_checks_the_group() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let first = service.create_group("First").await.unwrap();
    let second = service.create_group("Second").await.unwrap();
    let item = service
        .add_group_item(first.id, ItemKind::Product, c.p2.id, ItemStatus::Optional)
        .await
        .unwrap();

    assert!(matches!(
        service.remove_group_item(second.id, item.id).await,
        Err(FpackError::NotFound { .. })
    ));
    service.remove_group_item(first.id, item.id).await.unwrap();
    assert!(service.group_items(first.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_group_deletion() {
    let (service, store) = create_service();
    let c = seed_catalog(&service).await;
    let used = service.create_group("Used").await.unwrap();
    let unused = service.create_group("Unused").await.unwrap();
    service
        .add_group_item(unused.id, ItemKind::Product, c.p1.id, ItemStatus::Optional)
        .await
        .unwrap();

    let template = service
        .create_template(template_for("Line B", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Group, used.id)
        .await
        .unwrap();
    let project = service
        .create_project(project_for("Bordeaux", template.id, c.client.id))
        .await
        .unwrap();
    service
        .create_selection(project.id, used.id, ItemKind::Product, c.p2.id)
        .await
        .unwrap();

    let error = service.delete_group(used.id).await.unwrap_err();
    assert_eq!(
        dependent(&error, "template_columns").unwrap().names,
        vec!["Line B"]
    );
    assert_eq!(dependent(&error, "selections").unwrap().names, vec!["Bordeaux"]);

    // Items go with their group
    service.delete_group(unused.id).await.unwrap();
    assert_eq!(store.group_item_count(), 0);
}

// ===== Templates and columns =====

#[tokio::test]
async fn test_column_order_is_unique_per_template() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Line C", c.client.id))
        .await
        .unwrap();
    let other = service
        .create_template(template_for("Line D", c.client.id))
        .await
        .unwrap();

    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    let clash = service
        .add_column(template.id, 1, ColumnKind::Product, c.p2.id)
        .await;
    assert!(matches!(clash, Err(FpackError::Conflict { .. })));

    // Same order in another template is fine
    service
        .add_column(other.id, 1, ColumnKind::Product, c.p2.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_column_target_must_exist() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Line E", c.client.id))
        .await
        .unwrap();

    assert!(matches!(
        service
            .add_column(template.id, 1, ColumnKind::Equipment, 4_242)
            .await,
        Err(FpackError::NotFound { resource, .. }) if resource == "equipment"
    ));
    assert!(matches!(
        service.add_column(template.id, 1, ColumnKind::Group, 4_242).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "group"
    ));
}

#[tokio::test]
async fn test_bulk_columns_report_every_clashing_order() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Bulk", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 3, ColumnKind::Product, c.p3.id)
        .await
        .unwrap();

    let column = |order, product: &Product| NewColumn {
        template_id: template.id,
        order,
        kind: ColumnKind::Product,
        ref_id: product.id,
    };

    let result = service
        .add_columns(
            template.id,
            vec![column(1, &c.p1), column(1, &c.p2), column(3, &c.p2)],
        )
        .await;
    match result {
        Err(FpackError::Conflict { reason }) => assert!(reason.ends_with("1, 3"), "{}", reason),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(service.list_columns(template.id).await.unwrap().len(), 1);

    let created = service
        .add_columns(template.id, vec![column(1, &c.p1), column(2, &c.p2)])
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    let orders: Vec<i32> = service
        .list_columns(template.id)
        .await
        .unwrap()
        .iter()
        .map(|c| c.order)
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_reorder_columns() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Reorder", c.client.id))
        .await
        .unwrap();
    let a = service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    let b = service
        .add_column(template.id, 2, ColumnKind::Product, c.p2.id)
        .await
        .unwrap();

    // Swapping two orders in one call is allowed
    let reordered = service
        .reorder_columns(template.id, vec![(a.id, 2), (b.id, 1)])
        .await
        .unwrap();
    assert_eq!(reordered[0].id, b.id);
    assert_eq!(reordered[1].id, a.id);

    assert!(matches!(
        service.reorder_columns(template.id, vec![(a.id, 3)]).await,
        Err(FpackError::Validation { .. })
    ));
    assert!(matches!(
        service
            .reorder_columns(template.id, vec![(a.id, 5), (b.id, 5)])
            .await,
        Err(FpackError::Conflict { .. })
    ));
}

#[tokio::test]
async fn test_update_column_keeps_its_own_order() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Update", c.client.id))
        .await
        .unwrap();
    let column = service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    service
        .add_column(template.id, 2, ColumnKind::Product, c.p2.id)
        .await
        .unwrap();

    let updated = service
        .update_column(column.id, 1, ColumnKind::Product, c.p3.id)
        .await
        .unwrap();
    assert_eq!(updated.ref_id, c.p3.id);

    assert!(matches!(
        service
            .update_column(column.id, 2, ColumnKind::Product, c.p3.id)
            .await,
        Err(FpackError::Conflict { .. })
    ));
}

#[tokio::test]
async fn test_column_views_label_every_kind() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let kit = service.create_equipment(new_equipment("Frame")).await.unwrap();
    let group = service.create_group("Options").await.unwrap();
    service
        .add_group_item(group.id, ItemKind::Product, c.p2.id, ItemStatus::Standard)
        .await
        .unwrap();
    let template = service
        .create_template(template_for("Views", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    service
        .add_column(template.id, 2, ColumnKind::Equipment, kit.id)
        .await
        .unwrap();
    service
        .add_column(template.id, 3, ColumnKind::Group, group.id)
        .await
        .unwrap();

    let views = service.column_views(template.id).await.unwrap();
    let names: Vec<&str> = views.iter().map(|v| v.display_name.as_str()).collect();
    assert_eq!(names, vec!["Gripper", "Frame", "Options"]);
    assert!(views[0].group_items.is_empty());
    assert_eq!(views[2].group_items.len(), 1);
    assert_eq!(views[2].group_items[0].label, "Vacuum cup");
}

#[tokio::test]
async fn test_duplicate_template_copies_columns() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Line F", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    service
        .add_column(template.id, 4, ColumnKind::Product, c.p2.id)
        .await
        .unwrap();

    let copy = service.duplicate_template(template.id).await.unwrap();
    assert_eq!(copy.name, "Line F (copy)");
    assert_eq!(copy.client_id, c.client.id);

    let original: Vec<(i32, i32)> = service
        .list_columns(template.id)
        .await
        .unwrap()
        .iter()
        .map(|c| (c.order, c.ref_id))
        .collect();
    let copied: Vec<(i32, i32)> = service
        .list_columns(copy.id)
        .await
        .unwrap()
        .iter()
        .map(|c| (c.order, c.ref_id))
        .collect();
    assert_eq!(original, copied);
}

#[tokio::test]
async fn test_template_deletion() {
    let (service, store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Line G", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    let project = service
        .create_project(project_for("Lyon", template.id, c.client.id))
        .await
        .unwrap();

    let error = service.delete_template(template.id).await.unwrap_err();
    assert_eq!(dependent(&error, "projects").unwrap().names, vec!["Lyon"]);

    service.delete_project(project.id).await.unwrap();
    service.delete_template(template.id).await.unwrap();
    assert_eq!(store.column_count(), 0);
}

#[tokio::test]
async fn test_clear_columns() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let template = service
        .create_template(template_for("Clear", c.client.id))
        .await
        .unwrap();
    service
        .add_column(template.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    service
        .add_column(template.id, 2, ColumnKind::Product, c.p2.id)
        .await
        .unwrap();

    assert_eq!(service.clear_columns(template.id).await.unwrap(), 2);
    assert!(service.list_columns(template.id).await.unwrap().is_empty());
}

// ===== Projects and selections =====

#[tokio::test]
async fn test_one_selection_per_group() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let group = service.create_group("Cups").await.unwrap();
    let template = service
        .create_template(template_for("Line H", c.client.id))
        .await
        .unwrap();
    let project = service
        .create_project(project_for("Rennes", template.id, c.client.id))
        .await
        .unwrap();

    service
        .create_selection(project.id, group.id, ItemKind::Product, c.p1.id)
        .await
        .unwrap();
    assert!(matches!(
        service
            .create_selection(project.id, group.id, ItemKind::Product, c.p2.id)
            .await,
        Err(FpackError::Conflict { .. })
    ));

    let updated = service
        .update_selection(project.id, group.id, ItemKind::Product, c.p2.id)
        .await
        .unwrap();
    assert_eq!(updated.ref_id, c.p2.id);

    service.delete_selection(project.id, group.id).await.unwrap();
    assert!(matches!(
        service.delete_selection(project.id, group.id).await,
        Err(FpackError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_default_selections_pick_first_standard_item() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    let grippers = service.create_group("Grippers").await.unwrap();
    service
        .add_group_item(grippers.id, ItemKind::Product, c.p1.id, ItemStatus::Optional)
        .await
        .unwrap();
    service
        .add_group_item(grippers.id, ItemKind::Product, c.p2.id, ItemStatus::Standard)
        .await
        .unwrap();
    service
        .add_group_item(grippers.id, ItemKind::Product, c.p3.id, ItemStatus::Standard)
        .await
        .unwrap();
    let optional_only = service.create_group("Extras").await.unwrap();
    service
        .add_group_item(
            optional_only.id,
            ItemKind::Product,
            c.p3.id,
            ItemStatus::Optional,
        )
        .await
        .unwrap();
    let preselected = service.create_group("Sensors").await.unwrap();
    service
        .add_group_item(preselected.id, ItemKind::Product, c.p3.id, ItemStatus::Standard)
        .await
        .unwrap();

    let template = service
        .create_template(template_for("Line I", c.client.id))
        .await
        .unwrap();
    for (order, group) in [(1, &grippers), (2, &optional_only), (3, &preselected), (4, &grippers)] {
        service
            .add_column(template.id, order, ColumnKind::Group, group.id)
            .await
            .unwrap();
    }
    let project = service
        .create_project(project_for("Lille", template.id, c.client.id))
        .await
        .unwrap();
    service
        .create_selection(project.id, preselected.id, ItemKind::Product, c.p1.id)
        .await
        .unwrap();

    let recorded = service.apply_default_selections(project.id).await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].group_id, grippers.id);
    assert_eq!(recorded[0].ref_id, c.p2.id);

    // The existing choice is kept
    let selections = service.list_selections(project.id).await.unwrap();
    assert_eq!(selections.len(), 2);
    assert!(selections
        .iter()
        .any(|s| s.group_id == preselected.id && s.ref_id == c.p1.id));

    // Nothing left to default
    assert!(service
        .apply_default_selections(project.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_project_deletion_cascades_selections() {
    let (service, store) = create_service();
    let c = seed_catalog(&service).await;
    let group = service.create_group("Cups").await.unwrap();
    let template = service
        .create_template(template_for("Line J", c.client.id))
        .await
        .unwrap();
    let project = service
        .create_project(project_for("Tours", template.id, c.client.id))
        .await
        .unwrap();
    service
        .create_selection(project.id, group.id, ItemKind::Product, c.p1.id)
        .await
        .unwrap();

    service.delete_project(project.id).await.unwrap();
    assert_eq!(store.selection_count(), 0);
    assert!(matches!(
        service.get_project(project.id).await,
        Err(FpackError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_project_requires_template_and_client() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    assert!(matches!(
        service
            .create_project(project_for("Nowhere", 4_242, c.client.id))
            .await,
        Err(FpackError::NotFound { resource, .. }) if resource == "template"
    ));
}

#[tokio::test]
async fn test_duplicate_of_unknown_template_creates_nothing() {
    let (service, store) = create_service();
    let c = seed_catalog(&service).await;
    service
        .create_template(template_for("Line G", c.client.id))
        .await
        .unwrap();

    assert!(matches!(
        service.duplicate_template(4_242).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "template"
    ));
    assert_eq!(store.template_count(), 1);
}

// ===== Robot incompatibilities =====

#[tokio::test]
async fn test_robot_incompatibility_pairs_are_unique() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Scara", c.client.id))
        .await
        .unwrap();

    let pair = service
        .add_robot_incompatibility(robot.id, c.p1.id)
        .await
        .unwrap();
    assert_eq!(pair.robot_id, robot.id);
    assert!(matches!(
        service.add_robot_incompatibility(robot.id, c.p1.id).await,
        Err(FpackError::Conflict { .. })
    ));
    assert!(matches!(
        service.add_robot_incompatibility(robot.id, 4_242).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "product"
    ));
    assert!(matches!(
        service.add_robot_incompatibility(4_242, c.p1.id).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "robot"
    ));

    let robots = service.product_incompatible_robots(c.p1.id).await.unwrap();
    assert_eq!(robots.iter().map(|r| r.id).collect::<Vec<_>>(), vec![robot.id]);

    service
        .remove_robot_incompatibility(robot.id, c.p1.id)
        .await
        .unwrap();
    assert!(matches!(
        service.remove_robot_incompatibility(robot.id, c.p1.id).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "robot_incompatibility"
    ));
    assert!(service.list_robot_incompatibilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_batch_robot_incompatibilities_skip_existing_pairs() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Delta", c.client.id))
        .await
        .unwrap();
    service
        .add_robot_incompatibility(robot.id, c.p2.id)
        .await
        .unwrap();

    let outcome = service
        .add_robot_incompatibilities(robot.id, &[c.p1.id, c.p2.id, c.p3.id, c.p1.id])
        .await
        .unwrap();
    assert_eq!(
        outcome,
        BatchOutcome {
            added: 2,
            skipped: 1,
            total: 3
        }
    );

    let products = service.robot_incompatible_products(robot.id).await.unwrap();
    assert_eq!(
        products.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![c.p1.id, c.p2.id, c.p3.id]
    );

    // One unknown product rejects the whole batch
    let other = service
        .create_robot(new_robot("Cobot", c.client.id))
        .await
        .unwrap();
    assert!(matches!(
        service
            .add_robot_incompatibilities(other.id, &[c.p1.id, 4_242])
            .await,
        Err(FpackError::Validation { message }) if message.contains("4242")
    ));
    assert!(service
        .robot_incompatible_products(other.id)
        .await
        .unwrap()
        .is_empty());

    assert_eq!(service.clear_robot_incompatibilities(robot.id).await.unwrap(), 3);
    assert!(service.list_robot_incompatibilities().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_robot_incompatibility_guards_deletions() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let robot = service
        .create_robot(new_robot("Palletiser", c.client.id))
        .await
        .unwrap();
    service
        .add_robot_incompatibility(robot.id, c.p3.id)
        .await
        .unwrap();

    let error = service.delete_robot(robot.id).await.unwrap_err();
    assert_eq!(
        dependent(&error, "robot_incompatibilities").unwrap().names,
        vec!["Sensor"]
    );
    let error = service.delete_product(c.p3.id).await.unwrap_err();
    assert_eq!(
        dependent(&error, "robot_incompatibilities").unwrap().names,
        vec!["Palletiser"]
    );

    service
        .remove_robot_incompatibility(robot.id, c.p3.id)
        .await
        .unwrap();
    service.delete_robot(robot.id).await.unwrap();
    service.delete_product(c.p3.id).await.unwrap();
}

// ===== Global projects =====

#[tokio::test]
async fn test_global_project_lifecycle() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;

    assert!(matches!(
        service
            .create_global_project(global_for("Orphan", 4_242))
            .await,
        Err(FpackError::NotFound { resource, .. }) if resource == "client"
    ));
    assert!(matches!(
        service.create_global_project(global_for("  ", c.client.id)).await,
        Err(FpackError::Validation { .. })
    ));

    let global = service
        .create_global_project(NewGlobalProject {
            sub_project: Some("  Phase 2 ".into()),
            ..global_for("Biscuit plant", c.client.id)
        })
        .await
        .unwrap();
    assert_eq!(global.sub_project.as_deref(), Some("Phase 2"));

    let renamed = service
        .update_global_project(
            global.id,
            NewGlobalProject {
                sub_project: Some(String::new()),
                ..global_for("Biscuit plant Nantes", c.client.id)
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Biscuit plant Nantes");
    assert_eq!(renamed.sub_project, None);
    assert_eq!(service.list_global_projects().await.unwrap(), vec![renamed]);

    service.delete_global_project(global.id).await.unwrap();
    assert!(matches!(
        service.get_global_project(global.id).await,
        Err(FpackError::NotFound { resource, .. }) if resource == "global_project"
    ));
}

#[tokio::test]
async fn test_project_must_share_its_global_client() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let global = service
        .create_global_project(global_for("Cheese plant", c.other_client.id))
        .await
        .unwrap();
    let template = service
        .create_template(template_for("Line H", c.client.id))
        .await
        .unwrap();

    assert!(matches!(
        service
            .create_project(NewProject {
                global_id: Some(global.id),
                ..project_for("Mismatch", template.id, c.client.id)
            })
            .await,
        Err(FpackError::Validation { .. })
    ));
    assert!(matches!(
        service
            .create_project(NewProject {
                global_id: Some(4_242),
                ..project_for("Lost", template.id, c.client.id)
            })
            .await,
        Err(FpackError::NotFound { resource, .. }) if resource == "global_project"
    ));

    let project = service
        .create_project(NewProject {
            global_id: Some(global.id),
            ..project_for("Cheese line", template.id, c.other_client.id)
        })
        .await
        .unwrap();
    assert_eq!(project.global_id, Some(global.id));

    let detached = service
        .update_project(
            project.id,
            project_for("Cheese line", template.id, c.other_client.id),
        )
        .await
        .unwrap();
    assert_eq!(detached.global_id, None);
    assert!(service.list_global_members(global.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_global_client_change_and_deletion_are_guarded() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let global = service
        .create_global_project(global_for("Biscuit plant", c.client.id))
        .await
        .unwrap();
    let template = service
        .create_template(template_for("Line I", c.client.id))
        .await
        .unwrap();
    let project = service
        .create_project(NewProject {
            global_id: Some(global.id),
            ..project_for("Oven line", template.id, c.client.id)
        })
        .await
        .unwrap();

    match service
        .update_global_project(global.id, global_for("Biscuit plant", c.other_client.id))
        .await
    {
        Err(FpackError::Validation { message }) => assert!(message.contains("Oven line")),
        other => panic!("expected validation error, got {:?}", other),
    }

    let error = service.delete_global_project(global.id).await.unwrap_err();
    assert_eq!(dependent(&error, "projects").unwrap().names, vec!["Oven line"]);

    let error = service.delete_client(c.client.id).await.unwrap_err();
    assert_eq!(
        dependent(&error, "global_projects").unwrap().names,
        vec!["Biscuit plant"]
    );

    service.delete_project(project.id).await.unwrap();
    let moved = service
        .update_global_project(global.id, global_for("Biscuit plant", c.other_client.id))
        .await
        .unwrap();
    assert_eq!(moved.client_id, c.other_client.id);
    service.delete_global_project(global.id).await.unwrap();
}

/// T1 = [produit P1, group G1, group G2, group G1], T2 = [produit P1]
#[tokio::test]
async fn test_global_stats_count_distinct_expected_groups() {
    let (service, _store) = create_service();
    let c = seed_catalog(&service).await;
    let g1 = service.create_group("Gripper").await.unwrap();
    let g2 = service.create_group("Sensor").await.unwrap();
    let g3 = service.create_group("Unused").await.unwrap();

    let t1 = service
        .create_template(template_for("Line J", c.client.id))
        .await
        .unwrap();
    service
        .add_column(t1.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();
    service
        .add_column(t1.id, 2, ColumnKind::Group, g1.id)
        .await
        .unwrap();
    service
        .add_column(t1.id, 3, ColumnKind::Group, g2.id)
        .await
        .unwrap();
    service
        .add_column(t1.id, 4, ColumnKind::Group, g1.id)
        .await
        .unwrap();
    let t2 = service
        .create_template(template_for("Line K", c.client.id))
        .await
        .unwrap();
    service
        .add_column(t2.id, 1, ColumnKind::Product, c.p1.id)
        .await
        .unwrap();

    let global = service
        .create_global_project(global_for("Plant", c.client.id))
        .await
        .unwrap();
    let member = |name: &str, template_id: i32| NewProject {
        global_id: Some(global.id),
        ..project_for(name, template_id, c.client.id)
    };
    let done = service.create_project(member("Done", t1.id)).await.unwrap();
    let half = service.create_project(member("Half", t1.id)).await.unwrap();
    let empty = service.create_project(member("No groups", t2.id)).await.unwrap();

    for group in [&g1, &g2] {
        service
            .create_selection(done.id, group.id, ItemKind::Product, c.p2.id)
            .await
            .unwrap();
    }
    service
        .create_selection(half.id, g1.id, ItemKind::Product, c.p2.id)
        .await
        .unwrap();
    // A group the template never asks for does not count
    service
        .create_selection(half.id, g3.id, ItemKind::Product, c.p2.id)
        .await
        .unwrap();

    let stats = service.global_project_stats(global.id).await.unwrap();
    assert_eq!(stats.project_count, 3);
    assert_eq!(stats.complete_count, 1);
    assert_eq!(stats.in_progress_count, 2);
    assert_eq!(stats.total_groups, 4);
    assert_eq!(stats.total_selections, 3);
    assert_eq!(stats.progress_percent, dec!(75.0));

    let by_id = |id: i32| stats.projects.iter().find(|p| p.project_id == id).unwrap();
    assert!(by_id(done.id).complete);
    assert_eq!(by_id(done.id).progress_percent, dec!(100));
    assert_eq!(by_id(half.id).expected_groups, 2);
    assert_eq!(by_id(half.id).selection_count, 1);
    assert_eq!(by_id(half.id).progress_percent, dec!(50.0));
    assert!(!by_id(empty.id).complete);
    assert_eq!(by_id(empty.id).progress_percent, dec!(0));
}
