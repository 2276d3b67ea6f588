//! `mobile-stats`: keep the dashboard stats cards on one swipeable row on phones.

use dashcheck_core::RewriteRule;

use super::PatchSet;

const MARKER: &str = "/* Phase 10: Mobile Optimization for Sticky Row */";

const MOBILE_CSS: &str = "
/* Phase 10: Mobile Optimization for Sticky Row */
@media (max-width: 768px) {
  .dashboard-stats {
    display: flex !important;
    flex-wrap: nowrap !important;
    overflow-x: auto !important;
    -webkit-overflow-scrolling: touch;
    scroll-snap-type: x mandatory;
    padding-bottom: 8px !important;
  }
  .dashboard-stats .status-card {
    min-width: 140px !important;
    flex-shrink: 0;
    scroll-snap-align: start;
  }
}
";

pub fn mobile_stats() -> PatchSet {
    PatchSet::new(
        "mobile-stats",
        vec![RewriteRule::append("append-mobile-stats-row", MOBILE_CSS).unless(MARKER)],
    )
}
