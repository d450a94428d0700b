//! Canonical quote resolution: expansion, aggregation, pricing, totals

use super::aggregate::{present, Tally};
use super::expansion::expand_equipment;
use super::selection::resolve_group;
use super::source::QuoteSource;
use crate::contract::{
    ColumnKind, Diagnostic, FpackError, GlobalQuote, ItemKind, LineKind, PricedLine, Quote,
    QuoteLine, QuoteRequest, QuoteSummary, QuoteTotals, UnitPrice,
};
use rust_decimal::Decimal;

/// Resolves quotes against a [`QuoteSource`]
#[derive(Debug, Clone, Copy)]
pub struct QuoteEngine {
    /// Decimal places of presented amounts
    scale: u32,
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

impl QuoteEngine {
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }

    /// Resolve and price one quote.
    ///
    /// Only an unknown template or client is an error. Every other anomaly
    /// degrades into a skipped or zero-priced contribution and a diagnostic.
    pub async fn resolve(
        &self,
        source: &dyn QuoteSource,
        request: QuoteRequest,
    ) -> Result<Quote, FpackError> {
        self.resolve_inner(source, request)
            .await
            .map_err(|e| e.into_domain(request.template_id))
    }

    async fn resolve_inner(
        &self,
        source: &dyn QuoteSource,
        request: QuoteRequest,
    ) -> Result<Quote, ResolveError> {
        let mut diagnostics = Vec::new();
        let tally = self.tally(source, request, &mut diagnostics).await?;
        self.quote_from(source, request, tally, diagnostics).await
    }

    /// Quote every request on its own, then merge all of their quantities
    /// into one invoice priced for `client_id`.
    ///
    /// Fails on the first request naming an unknown template or client.
    pub async fn resolve_global(
        &self,
        source: &dyn QuoteSource,
        global_id: i32,
        client_id: i32,
        requests: &[QuoteRequest],
    ) -> Result<GlobalQuote, FpackError> {
        self.resolve_global_inner(source, global_id, client_id, requests)
            .await
            .map_err(|e| e.into_domain(global_id))
    }

    async fn resolve_global_inner(
        &self,
        source: &dyn QuoteSource,
        global_id: i32,
        client_id: i32,
        requests: &[QuoteRequest],
    ) -> Result<GlobalQuote, ResolveError> {
        if !source.client_exists(client_id).await? {
            return Err(FpackError::not_found("client", client_id).into());
        }

        let mut merged = Tally::default();
        let mut projects = Vec::with_capacity(requests.len());
        for request in requests {
            let mut diagnostics = Vec::new();
            let tally = self.tally(source, *request, &mut diagnostics).await?;
            merged.merge(&tally);
            projects.push(self.quote_from(source, *request, tally, diagnostics).await?);
        }

        // Missing prices are already reported by each project quote
        let priced = self.price(source, client_id, merged, &mut Vec::new()).await?;

        tracing::debug!(
            global_id,
            client_id,
            projects = projects.len(),
            lines = priced.summary.line_count,
            "global quote resolved"
        );

        Ok(GlobalQuote {
            global_id,
            client_id,
            projects,
            lines: priced.lines,
            totals: priced.totals,
            summary: priced.summary,
        })
    }

    /// Check the request targets and sum every contribution of its columns
    async fn tally(
        &self,
        source: &dyn QuoteSource,
        request: QuoteRequest,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Tally, ResolveError> {
        if !source.template_exists(request.template_id).await? {
            return Err(FpackError::not_found("template", request.template_id).into());
        }
        if !source.client_exists(request.client_id).await? {
            return Err(FpackError::not_found("client", request.client_id).into());
        }

        Ok(self
            .collect(source, request.template_id, request.instance_id, diagnostics)
            .await?)
    }

    async fn quote_from(
        &self,
        source: &dyn QuoteSource,
        request: QuoteRequest,
        tally: Tally,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Result<Quote, ResolveError> {
        let QuoteRequest {
            template_id,
            client_id,
            instance_id,
        } = request;
        let priced = self.price(source, client_id, tally, &mut diagnostics).await?;

        tracing::debug!(
            template_id,
            client_id,
            ?instance_id,
            lines = priced.summary.line_count,
            diagnostics = diagnostics.len(),
            "quote resolved"
        );

        Ok(Quote {
            template_id,
            client_id,
            instance_id,
            lines: priced.lines,
            totals: priced.totals,
            summary: priced.summary,
            diagnostics,
        })
    }

    /// Price aggregated quantities for one client, rounding each total once
    async fn price(
        &self,
        source: &dyn QuoteSource,
        client_id: i32,
        tally: Tally,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> anyhow::Result<Priced> {
        let mut lines = Vec::new();
        let mut product_subtotal = Decimal::ZERO;
        let mut transport_subtotal = Decimal::ZERO;

        for (key, quantity) in tally.into_entries() {
            let price = match key.kind {
                LineKind::Product => source.product_price(key.ref_id, client_id).await?,
                LineKind::Robot => source.robot_price(key.ref_id).await?,
            };
            let price = price.unwrap_or_else(|| {
                diagnostics.push(Diagnostic::MissingPrice {
                    kind: key.kind,
                    ref_id: key.ref_id,
                });
                UnitPrice {
                    unit_price: Decimal::ZERO,
                    unit_transport: Decimal::ZERO,
                    comment: None,
                }
            });

            let quantity_dec = Decimal::from(quantity);
            product_subtotal += quantity_dec * price.unit_price;
            transport_subtotal += quantity_dec * price.unit_transport;

            let line = PricedLine {
                ref_id: key.ref_id,
                display_name: source.display_name(key.kind.item_kind(), key.ref_id).await?,
                quantity,
                unit_price: price.unit_price,
                unit_transport: price.unit_transport,
                line_total: present(
                    quantity_dec * (price.unit_price + price.unit_transport),
                    self.scale,
                ),
                comment: price.comment,
            };
            lines.push(match key.kind {
                LineKind::Product => QuoteLine::Product(line),
                LineKind::Robot => QuoteLine::Robot(line),
            });
        }

        let product_subtotal = present(product_subtotal, self.scale);
        let transport_subtotal = present(transport_subtotal, self.scale);
        let totals = QuoteTotals {
            product_subtotal,
            transport_subtotal,
            grand_total: product_subtotal + transport_subtotal,
        };

        let robot_line_count = lines
            .iter()
            .filter(|l| l.kind() == LineKind::Robot)
            .count();
        let summary = QuoteSummary {
            line_count: lines.len(),
            product_line_count: lines.len() - robot_line_count,
            robot_line_count,
        };

        Ok(Priced {
            lines,
            totals,
            summary,
        })
    }

    /// Walk the columns in order and sum every contribution
    async fn collect(
        &self,
        source: &dyn QuoteSource,
        template_id: i32,
        instance_id: Option<i32>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> anyhow::Result<Tally> {
        let mut tally = Tally::default();

        for column in source.template_columns(template_id).await? {
            match column.kind {
                ColumnKind::Product => {
                    contribute_product(source, &mut tally, column.ref_id, diagnostics).await?
                }
                ColumnKind::Equipment => {
                    for (product_id, quantity) in
                        expand_equipment(source, column.ref_id, diagnostics).await?
                    {
                        tally.add(LineKind::Product, product_id, quantity);
                    }
                }
                ColumnKind::Group => {
                    let Some(item) =
                        resolve_group(source, instance_id, column.ref_id, diagnostics).await?
                    else {
                        continue;
                    };
                    match item.kind {
                        ItemKind::Product => tally.add(LineKind::Product, item.ref_id, 1),
                        ItemKind::Equipment => {
                            for (product_id, quantity) in
                                expand_equipment(source, item.ref_id, diagnostics).await?
                            {
                                tally.add(LineKind::Product, product_id, quantity);
                            }
                        }
                        ItemKind::Robot => tally.add(LineKind::Robot, item.ref_id, 1),
                    }
                }
            }
        }

        Ok(tally)
    }
}

async fn contribute_product(
    source: &dyn QuoteSource,
    tally: &mut Tally,
    product_id: i32,
    diagnostics: &mut Vec<Diagnostic>,
) -> anyhow::Result<()> {
    if source.item_name(ItemKind::Product, product_id).await?.is_some() {
        tally.add(LineKind::Product, product_id, 1);
    } else {
        diagnostics.push(Diagnostic::UnresolvedReference {
            kind: ColumnKind::Product,
            ref_id: product_id,
        });
    }
    Ok(())
}

struct Priced {
    lines: Vec<QuoteLine>,
    totals: QuoteTotals,
    summary: QuoteSummary,
}

enum ResolveError {
    Domain(FpackError),
    Storage(anyhow::Error),
}

impl ResolveError {
    fn into_domain(self, target_id: i32) -> FpackError {
        match self {
            Self::Domain(e) => e,
            Self::Storage(e) => {
                tracing::error!(error = ?e, target_id, "quote resolution failed on storage");
                FpackError::Internal
            }
        }
    }
}

impl From<FpackError> for ResolveError {
    fn from(e: FpackError) -> Self {
        Self::Domain(e)
    }
}

impl From<anyhow::Error> for ResolveError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e)
    }
}
