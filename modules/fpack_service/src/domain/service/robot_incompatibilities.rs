//! Robot-product incompatibility rules

use super::{storage, Service};
use crate::contract::{BatchOutcome, FpackError, Product, Robot, RobotIncompatibility};
use std::collections::BTreeSet;

impl Service {
    /// Declare a product unfit for a robot; a pair can only be declared once
    pub async fn add_robot_incompatibility(
        &self,
        robot_id: i32,
        product_id: i32,
    ) -> Result<RobotIncompatibility, FpackError> {
        self.get_robot(robot_id).await?;
        self.require_product(product_id).await?;

        let pair = RobotIncompatibility {
            robot_id,
            product_id,
        };
        if self.robot_pair_exists(&pair).await? {
            return Err(FpackError::Conflict {
                reason: format!(
                    "robot {} is already incompatible with product {}",
                    robot_id, product_id
                ),
            });
        }

        self.repos
            .catalog
            .add_robot_incompatibilities(std::slice::from_ref(&pair))
            .await
            .map_err(storage)?;
        tracing::debug!(robot_id, product_id, "robot incompatibility added");
        Ok(pair)
    }

    /// Declare several products unfit for a robot at once.
    ///
    /// Unknown products fail the whole batch; pairs already declared are
    /// skipped.
    pub async fn add_robot_incompatibilities(
        &self,
        robot_id: i32,
        product_ids: &[i32],
    ) -> Result<BatchOutcome, FpackError> {
        self.get_robot(robot_id).await?;

        let requested: BTreeSet<i32> = product_ids.iter().copied().collect();
        let mut unknown = Vec::new();
        for &product_id in &requested {
            if self
                .repos
                .catalog
                .find_product(product_id)
                .await
                .map_err(storage)?
                .is_none()
            {
                unknown.push(product_id.to_string());
            }
        }
        if !unknown.is_empty() {
            return Err(FpackError::Validation {
                message: format!("unknown products: {}", unknown.join(", ")),
            });
        }

        let existing: BTreeSet<i32> = self
            .repos
            .catalog
            .robot_incompatibilities_of_robot(robot_id)
            .await
            .map_err(storage)?
            .into_iter()
            .map(|p| p.product_id)
            .collect();
        let fresh: Vec<RobotIncompatibility> = requested
            .difference(&existing)
            .map(|&product_id| RobotIncompatibility {
                robot_id,
                product_id,
            })
            .collect();

        if !fresh.is_empty() {
            self.repos
                .catalog
                .add_robot_incompatibilities(&fresh)
                .await
                .map_err(storage)?;
        }

        let outcome = BatchOutcome {
            added: fresh.len(),
            skipped: requested.len() - fresh.len(),
            total: requested.len(),
        };
        tracing::info!(
            robot_id,
            added = outcome.added,
            skipped = outcome.skipped,
            "robot incompatibilities added"
        );
        Ok(outcome)
    }

    pub async fn remove_robot_incompatibility(
        &self,
        robot_id: i32,
        product_id: i32,
    ) -> Result<(), FpackError> {
        let pair = RobotIncompatibility {
            robot_id,
            product_id,
        };
        if !self.robot_pair_exists(&pair).await? {
            return Err(FpackError::not_found(
                "robot_incompatibility",
                format!("{}/{}", robot_id, product_id),
            ));
        }

        self.repos
            .catalog
            .remove_robot_incompatibility(&pair)
            .await
            .map_err(storage)
    }

    /// Remove every incompatibility of a robot, returning how many went
    pub async fn clear_robot_incompatibilities(&self, robot_id: i32) -> Result<u64, FpackError> {
        self.get_robot(robot_id).await?;
        self.repos
            .catalog
            .clear_robot_incompatibilities(robot_id)
            .await
            .map_err(storage)
    }

    pub async fn list_robot_incompatibilities(
        &self,
    ) -> Result<Vec<RobotIncompatibility>, FpackError> {
        self.repos
            .catalog
            .list_robot_incompatibilities()
            .await
            .map_err(storage)
    }

    /// Products a robot must not be fitted with
    pub async fn robot_incompatible_products(
        &self,
        robot_id: i32,
    ) -> Result<Vec<Product>, FpackError> {
        self.get_robot(robot_id).await?;

        let pairs = self
            .repos
            .catalog
            .robot_incompatibilities_of_robot(robot_id)
            .await
            .map_err(storage)?;

        let mut products = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if let Some(product) = self
                .repos
                .catalog
                .find_product(pair.product_id)
                .await
                .map_err(storage)?
            {
                products.push(product);
            }
        }
        Ok(products)
    }

    /// Robots a product must not be fitted to
    pub async fn product_incompatible_robots(
        &self,
        product_id: i32,
    ) -> Result<Vec<Robot>, FpackError> {
        self.require_product(product_id).await?;

        let pairs = self
            .repos
            .catalog
            .robot_incompatibilities_of_product(product_id)
            .await
            .map_err(storage)?;

        let mut robots = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if let Some(robot) = self
                .repos
                .catalog
                .find_robot(pair.robot_id)
                .await
                .map_err(storage)?
            {
                robots.push(robot);
            }
        }
        Ok(robots)
    }

    async fn robot_pair_exists(&self, pair: &RobotIncompatibility) -> Result<bool, FpackError> {
        let pairs = self
            .repos
            .catalog
            .robot_incompatibilities_of_robot(pair.robot_id)
            .await
            .map_err(storage)?;
        Ok(pairs.iter().any(|p| p.product_id == pair.product_id))
    }
}
