//! Product and robot price tables

use super::{storage, Service};
use crate::contract::{FpackError, Price, RobotPrice, UnitPrice};
use crate::domain::validation::{validate_amount, validate_optional_text, MAX_TEXT_LEN};

impl Service {
    // ===== Product prices =====

    /// Record the price of a product for a client; one row per pair
    pub async fn create_price(
        &self,
        product_id: i32,
        client_id: i32,
        price: UnitPrice,
    ) -> Result<Price, FpackError> {
        let price = checked_price(price)?;
        self.require_product(product_id).await?;
        self.require_client(client_id).await?;

        if self
            .repos
            .prices
            .find_price(product_id, client_id)
            .await
            .map_err(storage)?
            .is_some()
        {
            return Err(FpackError::Conflict {
                reason: format!(
                    "product {} already has a price for client {}",
                    product_id, client_id
                ),
            });
        }

        self.repos
            .prices
            .insert_price(&Price {
                product_id,
                client_id,
                unit_price: price.unit_price,
                unit_transport: price.unit_transport,
                comment: price.comment,
            })
            .await
            .map_err(storage)
    }

    pub async fn get_price(&self, product_id: i32, client_id: i32) -> Result<Price, FpackError> {
        self.repos
            .prices
            .find_price(product_id, client_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("price", format!("{}/{}", product_id, client_id)))
    }

    pub async fn list_prices(&self) -> Result<Vec<Price>, FpackError> {
        self.repos.prices.list_prices().await.map_err(storage)
    }

    /// Prices of every product for one client
    pub async fn client_prices(&self, client_id: i32) -> Result<Vec<Price>, FpackError> {
        self.require_client(client_id).await?;
        self.repos
            .prices
            .prices_for_client(client_id)
            .await
            .map_err(storage)
    }

    pub async fn update_price(
        &self,
        product_id: i32,
        client_id: i32,
        price: UnitPrice,
    ) -> Result<Price, FpackError> {
        let price = checked_price(price)?;
        self.get_price(product_id, client_id).await?;

        self.repos
            .prices
            .update_price(&Price {
                product_id,
                client_id,
                unit_price: price.unit_price,
                unit_transport: price.unit_transport,
                comment: price.comment,
            })
            .await
            .map_err(storage)
    }

    pub async fn delete_price(&self, product_id: i32, client_id: i32) -> Result<(), FpackError> {
        self.get_price(product_id, client_id).await?;
        self.repos
            .prices
            .delete_price(product_id, client_id)
            .await
            .map_err(storage)
    }

    // ===== Robot prices =====

    /// Record the price of a robot. The robot reference is copied for display.
    pub async fn create_robot_price(
        &self,
        robot_id: i32,
        price: UnitPrice,
    ) -> Result<RobotPrice, FpackError> {
        let price = checked_price(price)?;
        let robot = self.get_robot(robot_id).await?;

        if self
            .repos
            .prices
            .find_robot_price(robot_id)
            .await
            .map_err(storage)?
            .is_some()
        {
            return Err(FpackError::Conflict {
                reason: format!("robot {} already has a price", robot_id),
            });
        }

        self.repos
            .prices
            .insert_robot_price(&RobotPrice {
                robot_id,
                reference: robot.reference,
                unit_price: price.unit_price,
                unit_transport: price.unit_transport,
                comment: price.comment,
            })
            .await
            .map_err(storage)
    }

    pub async fn get_robot_price(&self, robot_id: i32) -> Result<RobotPrice, FpackError> {
        self.repos
            .prices
            .find_robot_price(robot_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("robot price", robot_id))
    }

    pub async fn list_robot_prices(&self) -> Result<Vec<RobotPrice>, FpackError> {
        self.repos.prices.list_robot_prices().await.map_err(storage)
    }

    pub async fn update_robot_price(
        &self,
        robot_id: i32,
        price: UnitPrice,
    ) -> Result<RobotPrice, FpackError> {
        let price = checked_price(price)?;
        let existing = self.get_robot_price(robot_id).await?;

        self.repos
            .prices
            .update_robot_price(&RobotPrice {
                robot_id,
                reference: existing.reference,
                unit_price: price.unit_price,
                unit_transport: price.unit_transport,
                comment: price.comment,
            })
            .await
            .map_err(storage)
    }

    pub async fn delete_robot_price(&self, robot_id: i32) -> Result<(), FpackError> {
        self.get_robot_price(robot_id).await?;
        self.repos
            .prices
            .delete_robot_price(robot_id)
            .await
            .map_err(storage)
    }
}

fn checked_price(price: UnitPrice) -> Result<UnitPrice, FpackError> {
    validate_amount("unit_price", price.unit_price)?;
    validate_amount("unit_transport", price.unit_transport)?;
    Ok(UnitPrice {
        comment: validate_optional_text("comment", price.comment.as_deref(), MAX_TEXT_LEN)?,
        ..price
    })
}
