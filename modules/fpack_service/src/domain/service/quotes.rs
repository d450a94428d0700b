//! Quote entry points

use super::Service;
use crate::contract::{FpackError, GlobalQuote, Quote, QuoteRequest};

impl Service {
    /// Quote a project with its own template, client and selections
    pub async fn quote_project(&self, project_id: i32) -> Result<Quote, FpackError> {
        let project = self.get_project(project_id).await?;
        self.quote(QuoteRequest {
            template_id: project.template_id,
            client_id: project.client_id,
            instance_id: Some(project.id),
        })
        .await
    }

    /// Quote every member project of a global project and merge their lines
    /// into one invoice for the global project's client
    pub async fn quote_global_project(&self, id: i32) -> Result<GlobalQuote, FpackError> {
        let global = self.get_global_project(id).await?;
        let requests: Vec<QuoteRequest> = self
            .list_global_members(id)
            .await?
            .into_iter()
            .map(|project| QuoteRequest {
                template_id: project.template_id,
                client_id: global.client_id,
                instance_id: Some(project.id),
            })
            .collect();

        self.engine
            .resolve_global(&self.source, id, global.client_id, &requests)
            .await
    }

    /// Quote a bare template for a client; every group column is skipped
    pub async fn quote_template(
        &self,
        template_id: i32,
        client_id: i32,
    ) -> Result<Quote, FpackError> {
        self.quote(QuoteRequest {
            template_id,
            client_id,
            instance_id: None,
        })
        .await
    }

    /// Resolve any quote request
    pub async fn quote(&self, request: QuoteRequest) -> Result<Quote, FpackError> {
        let quote = self.engine.resolve(&self.source, request).await?;
        for diagnostic in &quote.diagnostics {
            tracing::debug!(?diagnostic, template_id = request.template_id, "quote diagnostic");
        }
        Ok(quote)
    }
}
