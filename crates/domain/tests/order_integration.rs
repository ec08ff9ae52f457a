//! Integration tests for the order use-cases.
//!
//! These tests drive [`OrderService`] and [`DirectoryService`] against the
//! in-memory store, covering the full order lifecycle, lookup precedence
//! and the price snapshot taken when an item is created.

use common::{CustomerId, OfferId, OrderId, OrderItemId, PageRequest, UserId};
use domain::{
    AddOrderItem, ChangeOrderStatus, CreateOrder, DirectoryService, DomainError, Money, NewOffer,
    Offer, OfferKind, OrderError, OrderLine, OrderResponse, OrderService, OrderStatus,
    RemoveOrderItem, Role, UpdateOrder, UpdateOrderItemQuantity,
};
use rust_decimal::Decimal;
use store::InMemoryStore;

struct Fixture {
    orders: OrderService<InMemoryStore>,
    directory: DirectoryService<InMemoryStore>,
    customer_id: CustomerId,
    user_id: UserId,
}

/// Helper to create services sharing one store, with a customer and a clerk.
async fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let directory = DirectoryService::new(store.clone());

    let customer = directory
        .register_customer("C1".into(), "c1@example.com".into(), None, None)
        .await
        .unwrap();
    let user = directory
        .register_user("u1".into(), "u1@example.com".into(), Role::Staff)
        .await
        .unwrap();

    Fixture {
        orders: OrderService::new(store),
        directory,
        customer_id: customer.id().unwrap(),
        user_id: user.id().unwrap(),
    }
}

async fn offer(fx: &Fixture, name: &str, price: i64) -> Offer {
    fx.directory
        .register_offer(NewOffer {
            name: name.to_string(),
            description: None,
            price: Money::from_major(price),
            kind: OfferKind::Product,
            category_id: None,
            supplier_id: None,
        })
        .await
        .unwrap()
}

async fn order_with(fx: &Fixture, offer: &Offer, quantity: u32) -> OrderResponse {
    fx.orders
        .create_order(CreateOrder::new(
            fx.customer_id,
            fx.user_id,
            vec![OrderLine::new(offer.id().unwrap(), quantity)],
        ))
        .await
        .unwrap()
}

fn ids(order: &OrderResponse) -> (OrderId, OrderItemId) {
    (order.id.unwrap(), order.items[0].id.unwrap())
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn scenario_a_create_order() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;

        let order = order_with(&fx, &widget, 2).await;

        assert!(order.id.is_some());
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, Money::from_major(20));
        assert_eq!(order.customer.id, Some(fx.customer_id));
        assert_eq!(order.user.id, Some(fx.user_id));
    }

    #[tokio::test]
    async fn scenario_b_add_item() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let gadget = offer(&fx, "Gadget", 50).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 2).await);

        let order = fx
            .orders
            .add_order_item(AddOrderItem::new(order_id, gadget.id().unwrap(), 2))
            .await
            .unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_price, Money::from_major(120));

        let reloaded = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(reloaded.total_price, Money::from_major(120));
    }

    #[tokio::test]
    async fn items_keep_input_order() {
        let fx = fixture().await;
        let a = offer(&fx, "A", 1).await;
        let b = offer(&fx, "B", 2).await;
        let c = offer(&fx, "C", 3).await;

        let order = fx
            .orders
            .create_order(CreateOrder::new(
                fx.customer_id,
                fx.user_id,
                vec![
                    OrderLine::new(c.id().unwrap(), 1),
                    OrderLine::new(a.id().unwrap(), 1),
                    OrderLine::new(b.id().unwrap(), 1),
                ],
            ))
            .await
            .unwrap();

        let names: Vec<&str> = order.items.iter().map(|i| i.offer.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(order.total_price, Money::from_major(6));
    }

    #[tokio::test]
    async fn total_follows_every_mutation() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let gadget = offer(&fx, "Gadget", 5).await;
        let (order_id, first_item) = ids(&order_with(&fx, &widget, 1).await);

        let order = fx
            .orders
            .add_order_item(AddOrderItem::new(order_id, gadget.id().unwrap(), 4))
            .await
            .unwrap();
        assert_eq!(order.total_price, Money::from_major(30));

        let order = fx
            .orders
            .update_order_item_quantity(UpdateOrderItemQuantity::new(order_id, first_item, 3))
            .await
            .unwrap();
        assert_eq!(order.total_price, Money::from_major(50));

        let order = fx
            .orders
            .remove_order_item(RemoveOrderItem::new(order_id, first_item))
            .await
            .unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, Money::from_major(20));
    }

    #[tokio::test]
    async fn complete_then_cancel() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        let order = fx
            .orders
            .change_order_status(ChangeOrderStatus::to(order_id, OrderStatus::Completed))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Completed);

        let order = fx
            .orders
            .change_order_status(ChangeOrderStatus::to(order_id, OrderStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn update_order_reassigns_customer() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);
        let other = fx
            .directory
            .register_customer("C2".into(), "c2@example.com".into(), None, None)
            .await
            .unwrap();

        let order = fx
            .orders
            .update_order(UpdateOrder::new(order_id, other.id().unwrap()))
            .await
            .unwrap();

        assert_eq!(order.customer.id, other.id());
        assert_eq!(order.customer.name, "C2");
    }

    #[tokio::test]
    async fn delete_order_then_lookup_fails() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        fx.orders.delete_order(order_id).await.unwrap();

        let result = fx.orders.get_order(order_id).await;
        assert!(matches!(result, Err(DomainError::OrderNotFound(id)) if id == order_id));
        assert_eq!(fx.orders.store().order_count().await, 0);
    }
}

mod snapshot_pricing {
    use super::*;

    #[tokio::test]
    async fn price_change_does_not_touch_existing_items() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 2).await);

        fx.directory
            .update_offer_price(widget.id().unwrap(), Money::from_major(99))
            .await
            .unwrap();

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.items[0].offer.price, Money::from_major(99));
        assert_eq!(order.items[0].price_at_time_of_order, Money::from_major(10));
        assert_eq!(order.total_price, Money::from_major(20));
    }

    #[tokio::test]
    async fn items_added_after_price_change_use_new_price() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        fx.directory
            .update_offer_price(widget.id().unwrap(), Money::from_major(15))
            .await
            .unwrap();
        let order = fx
            .orders
            .add_order_item(AddOrderItem::new(order_id, widget.id().unwrap(), 1))
            .await
            .unwrap();

        assert_eq!(order.items[0].price_at_time_of_order, Money::from_major(10));
        assert_eq!(order.items[1].price_at_time_of_order, Money::from_major(15));
        assert_eq!(order.total_price, Money::from_major(25));
    }
}

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn scenario_c_cancelled_order_is_final() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        fx.orders
            .change_order_status(ChangeOrderStatus::to(order_id, OrderStatus::Cancelled))
            .await
            .unwrap();

        let result = fx
            .orders
            .change_order_status(ChangeOrderStatus::to(order_id, OrderStatus::InProgress))
            .await;

        match result {
            Err(DomainError::Order(OrderError::CancelledOrderIsFinal { requested })) => {
                assert_eq!(requested, OrderStatus::InProgress);
            }
            other => panic!("expected CancelledOrderIsFinal, got {:?}", other),
        }

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancelling_a_cancelled_order_is_allowed() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        for _ in 0..2 {
            let order = fx
                .orders
                .change_order_status(ChangeOrderStatus::to(order_id, OrderStatus::Cancelled))
                .await
                .unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn scenario_d_cannot_remove_last_item() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, item_id) = ids(&order_with(&fx, &widget, 1).await);

        let result = fx
            .orders
            .remove_order_item(RemoveOrderItem::new(order_id, item_id))
            .await;

        match result {
            Err(DomainError::Order(OrderError::Validation(errors))) => {
                assert!(errors.has_field("items"));
                assert!(errors.to_string().contains("at least one item"));
            }
            other => panic!("expected order validation error, got {:?}", other),
        }

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.items.len(), 1);
    }

    #[tokio::test]
    async fn scenario_e_unknown_item_id() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let created = order_with(&fx, &widget, 2).await;
        let (order_id, _) = ids(&created);
        let missing = OrderItemId::new();

        let result = fx
            .orders
            .update_order_item_quantity(UpdateOrderItemQuantity::new(order_id, missing, 5))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ItemNotFound { item_id })) if item_id == missing
        ));

        let result = fx
            .orders
            .remove_order_item(RemoveOrderItem::new(order_id, missing))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ItemNotFound { .. }))
        ));

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.items, created.items);
        assert_eq!(order.total_price, created.total_price);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_and_order_unchanged() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let created = order_with(&fx, &widget, 2).await;
        let (order_id, item_id) = ids(&created);

        let result = fx
            .orders
            .update_order_item_quantity(UpdateOrderItemQuantity::new(order_id, item_id, 0))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ItemValidation(_)))
        ));

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn missing_status_is_an_illegal_argument() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let (order_id, _) = ids(&order_with(&fx, &widget, 1).await);

        let result = fx
            .orders
            .change_order_status(ChangeOrderStatus::new(order_id, None))
            .await;

        assert!(matches!(result, Err(DomainError::IllegalArgument(_))));
    }

    #[tokio::test]
    async fn create_with_no_lines_fails_validation() {
        let fx = fixture().await;

        let result = fx
            .orders
            .create_order(CreateOrder::new(fx.customer_id, fx.user_id, vec![]))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::Validation(ref e))) if e.has_field("items")
        ));
        assert_eq!(fx.orders.store().order_count().await, 0);
    }

    #[tokio::test]
    async fn operations_on_missing_order() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let missing = OrderId::new();

        assert!(matches!(
            fx.orders.get_order(missing).await,
            Err(DomainError::OrderNotFound(_))
        ));
        assert!(matches!(
            fx.orders
                .add_order_item(AddOrderItem::new(missing, widget.id().unwrap(), 1))
                .await,
            Err(DomainError::OrderNotFound(_))
        ));
        assert!(matches!(
            fx.orders.delete_order(missing).await,
            Err(DomainError::OrderNotFound(_))
        ));
    }
}

mod money_limits {
    use super::*;

    async fn offer_at_max(fx: &Fixture) -> Offer {
        fx.directory
            .register_offer(NewOffer {
                name: "Gold".to_string(),
                description: None,
                price: Money::new(Decimal::MAX),
                kind: OfferKind::Product,
                category_id: None,
                supplier_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn overflowing_line_is_rejected_before_saving() {
        let fx = fixture().await;
        let gold = offer_at_max(&fx).await;

        let result = fx
            .orders
            .create_order(CreateOrder::new(
                fx.customer_id,
                fx.user_id,
                vec![OrderLine::new(gold.id().unwrap(), 2)],
            ))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ItemValidation(ref e))) if e.has_field("quantity")
        ));
        assert_eq!(fx.orders.store().order_count().await, 0);

        let listed = fx.orders.list_orders(PageRequest::default()).await.unwrap();
        assert_eq!(listed.total, 0);
    }

    #[tokio::test]
    async fn overflowing_total_is_rejected_and_stored_order_stays_readable() {
        let fx = fixture().await;
        let gold = offer_at_max(&fx).await;
        let created = order_with(&fx, &gold, 1).await;
        let (order_id, item_id) = ids(&created);

        let result = fx
            .orders
            .add_order_item(AddOrderItem::new(order_id, gold.id().unwrap(), 1))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::Validation(ref e))) if e.has_field("items")
        ));

        let result = fx
            .orders
            .update_order_item_quantity(UpdateOrderItemQuantity::new(order_id, item_id, 2))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Order(OrderError::ItemValidation(_)))
        ));

        let order = fx.orders.get_order(order_id).await.unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, Money::new(Decimal::MAX));

        let listed = fx.orders.list_orders(PageRequest::default()).await.unwrap();
        assert_eq!(listed.total, 1);
    }
}

mod lookup_precedence {
    use super::*;

    #[tokio::test]
    async fn offers_are_resolved_before_customer_and_user() {
        let fx = fixture().await;
        let missing_offer = OfferId::new();

        let result = fx
            .orders
            .create_order(CreateOrder::new(
                CustomerId::new(),
                UserId::new(),
                vec![OrderLine::new(missing_offer, 1)],
            ))
            .await;

        assert!(matches!(result, Err(DomainError::OfferNotFound(id)) if id == missing_offer));
    }

    #[tokio::test]
    async fn customer_is_resolved_before_user() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;

        let result = fx
            .orders
            .create_order(CreateOrder::new(
                CustomerId::new(),
                UserId::new(),
                vec![OrderLine::new(widget.id().unwrap(), 1)],
            ))
            .await;
        assert!(matches!(result, Err(DomainError::CustomerNotFound(_))));

        let result = fx
            .orders
            .create_order(CreateOrder::new(
                fx.customer_id,
                UserId::new(),
                vec![OrderLine::new(widget.id().unwrap(), 1)],
            ))
            .await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_by_customer_and_user() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;
        let other_customer = fx
            .directory
            .register_customer("C2".into(), "c2@example.com".into(), None, None)
            .await
            .unwrap();
        let other_user = fx
            .directory
            .register_user("u2".into(), "u2@example.com".into(), Role::Admin)
            .await
            .unwrap();

        for _ in 0..3 {
            order_with(&fx, &widget, 1).await;
        }
        fx.orders
            .create_order(CreateOrder::new(
                other_customer.id().unwrap(),
                other_user.id().unwrap(),
                vec![OrderLine::new(widget.id().unwrap(), 1)],
            ))
            .await
            .unwrap();

        let all = fx.orders.list_orders(PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(all.total, 4);
        assert_eq!(all.items.len(), 2);
        assert_eq!(all.total_pages(), 2);

        let mine = fx
            .orders
            .list_orders_by_customer(fx.customer_id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total, 3);
        assert!(mine.items.iter().all(|o| o.customer.id == Some(fx.customer_id)));

        let theirs = fx
            .orders
            .list_orders_by_user(other_user.id().unwrap(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(theirs.total, 1);
        assert_eq!(theirs.items[0].user.username, "u2");
    }
}

mod directory {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn duplicate_registrations_conflict() {
        let fx = fixture().await;

        let result = fx
            .directory
            .register_customer("Again".into(), "C1@example.com".into(), None, None)
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        let result = fx
            .directory
            .register_user("u1".into(), "other@example.com".into(), Role::Admin)
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        fx.directory
            .register_category("Tools".into(), None)
            .await
            .unwrap();
        let result = fx.directory.register_category("tools".into(), None).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_admit_a_single_customer() {
        let fx = fixture().await;
        let directory = Arc::new(fx.directory);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move {
                    let name = format!("Twin {i}");
                    directory
                        .register_customer(name, "twin@example.com".into(), None, None)
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn padded_natural_keys_conflict_with_existing_records() {
        let fx = fixture().await;

        let result = fx
            .directory
            .register_customer("Again".into(), " c1@example.com".into(), None, None)
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        let result = fx
            .directory
            .register_user("u1 ".into(), "other@example.com".into(), Role::Staff)
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        let jane = fx
            .directory
            .register_customer("Jane".into(), "  jane@example.com ".into(), None, None)
            .await
            .unwrap();
        assert_eq!(jane.email(), "jane@example.com");
        let result = fx
            .directory
            .register_customer("Jane".into(), "jane@example.com".into(), None, None)
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn offer_must_reference_existing_category_and_supplier() {
        let fx = fixture().await;
        let category = fx
            .directory
            .register_category("Tools".into(), Some("Hand tools".into()))
            .await
            .unwrap();
        let supplier = fx
            .directory
            .register_supplier("Acme".into(), "sales@acme.test".into(), None)
            .await
            .unwrap();

        let offer = fx
            .directory
            .register_offer(NewOffer {
                name: "Hammer".into(),
                description: None,
                price: Money::from_minor(1250, 2),
                kind: OfferKind::Product,
                category_id: category.id(),
                supplier_id: supplier.id(),
            })
            .await
            .unwrap();
        assert_eq!(offer.category_id(), category.id());
        assert_eq!(offer.supplier_id(), supplier.id());

        let result = fx
            .directory
            .register_offer(NewOffer {
                name: "Saw".into(),
                description: None,
                price: Money::from_major(20),
                kind: OfferKind::Product,
                category_id: Some(common::CategoryId::new()),
                supplier_id: None,
            })
            .await;
        assert!(matches!(result, Err(DomainError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn invalid_price_update_is_rejected() {
        let fx = fixture().await;
        let widget = offer(&fx, "Widget", 10).await;

        let result = fx
            .directory
            .update_offer_price(widget.id().unwrap(), Money::zero())
            .await;
        assert!(matches!(result, Err(DomainError::Validation(ref e)) if e.has_field("price")));

        let stored = fx.directory.get_offer(widget.id().unwrap()).await.unwrap();
        assert_eq!(stored.price(), Money::from_major(10));
    }
}
