//! Text reports for a permit list.
//!
//! [`ListReport`] and [`StatisticsReport`] implement `Display`, so they can
//! be written straight into any formatter; [`render_list`] and
//! [`render_statistics`] are the `String` shorthands.

use std::fmt;

use permit_chain_list::{PermitList, Statistics};

const HEAVY_RULE: usize = 60;
const LIGHT_RULE: usize = 40;

/// The list, head to tail, one block per permit.
pub struct ListReport<'a, E, C> {
    list: &'a PermitList<E, C>,
    show_revoked: bool,
}

impl<'a, E, C> ListReport<'a, E, C> {
    /// Revoked permits are skipped unless `show_revoked` is set. Skipped
    /// permits still count toward the positions of later ones.
    pub fn new(list: &'a PermitList<E, C>, show_revoked: bool) -> Self {
        Self { list, show_revoked }
    }
}

impl<E, C> fmt::Display for ListReport<'_, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(HEAVY_RULE))?;
        writeln!(f, "Permit Linked List (Size: {})", self.list.len())?;
        writeln!(f, "{}", "=".repeat(HEAVY_RULE))?;

        if self.list.is_empty() {
            return writeln!(f, "List is empty");
        }

        for (position, entry) in self.list.iter().enumerate() {
            let permit = entry.permit;
            if permit.is_revoked() && !self.show_revoked {
                continue;
            }
            writeln!(f, "Position: {}", position)?;
            writeln!(f, "Node ID: {}", entry.id)?;
            writeln!(f, "Domains: {}", permit.domains())?;
            writeln!(f, "Key: {}...", permit.key().short_hex())?;
            writeln!(f, "Status: {}", permit.status())?;
            writeln!(f, "Timestamp: {:.6}", permit.timestamp())?;
            writeln!(f, "{}", "-".repeat(LIGHT_RULE))?;
        }
        Ok(())
    }
}

/// Aggregate counts, with the domain distribution in name order.
pub struct StatisticsReport<'a>(pub &'a Statistics);

impl fmt::Display for StatisticsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "Total permits: {}", stats.total_permits)?;
        writeln!(f, "Active permits: {}", stats.active_permits)?;
        writeln!(f, "Revoked permits: {}", stats.revoked_permits)?;

        let distribution: Vec<String> = stats
            .domain_distribution
            .iter()
            .map(|(domain, count)| format!("{}:{}", domain, count))
            .collect();
        writeln!(f, "Domain distribution: {{{}}}", distribution.join(" "))?;
        writeln!(
            f,
            "Average domains per permit: {:.2}",
            stats.average_domains_per_permit
        )
    }
}

/// Render the list as text.
pub fn render_list<E, C>(list: &PermitList<E, C>, show_revoked: bool) -> String {
    ListReport::new(list, show_revoked).to_string()
}

/// Render statistics as text.
pub fn render_statistics(stats: &Statistics) -> String {
    StatisticsReport(stats).to_string()
}
