// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Ticket Allocation

use crate::profile::DoorPolicy;
use crate::types::{PricingSchedule, TicketAllocation, TierName};

/// Total enforceable capacity. `None` when any tier is unlimited.
pub fn total_capacity(schedule: &PricingSchedule, door: DoorPolicy) -> Option<u64> {
    TierName::ALL
        .iter()
        .map(|&t| schedule.effective_limit(t, door))
        .try_fold(0u64, |acc, limit| limit.map(|l| acc.saturating_add(l)))
}

/// Fill tiers strictly in declared order. Each tier takes
/// `min(remaining, limit)`; an unlimited tier takes everything left.
///
/// Guests beyond total capacity are dropped, so callers that need
/// `allocation.total() == guests` must cap `guests` first.
pub fn allocate_tickets(estimated_guests: u64, schedule: &PricingSchedule, door: DoorPolicy) -> TicketAllocation {
    let mut allocation = TicketAllocation::default();
    let mut remaining = estimated_guests;
    for tier in TierName::ALL {
        if remaining == 0 {
            break;
        }
        let sold = match schedule.effective_limit(tier, door) {
            Some(limit) => remaining.min(limit),
            None => remaining,
        };
        allocation.set(tier, sold);
        remaining -= sold;
    }
    allocation
}
