// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Representative helpdesk tickets.

use helpdesk_core::{Ticket, TicketCategory, TicketPriority, TicketStatus};

/// Open printer ticket without a solution.
pub fn printer_ticket() -> Ticket {
    Ticket::new(
        "T-1",
        "Drukarka nie drukuje",
        "Drukarka w dyspozytorni nie reaguje na zlecenia wydruku",
    )
    .with_priority(TicketPriority::High)
    .with_category(TicketCategory::Afternoon)
    .with_tags(["drukarka", "sieć"])
}

/// Resolved defibrillator ticket.
pub fn defibrillator_ticket() -> Ticket {
    Ticket::new(
        "T-2",
        "Defibrylator nie przesyła danych",
        "Brak synchronizacji zapisu EKG z defibrylatora do systemu",
    )
    .with_priority(TicketPriority::Urgent)
    .with_category(TicketCategory::Overdue)
    .with_tags(["defibrylator", "ekg"])
    .resolved_with("Ponowne sparowanie modułu Bluetooth i aktualizacja firmware")
}

/// In-progress mobile app ticket.
pub fn automapa_ticket() -> Ticket {
    Ticket::new(
        "T-3",
        "Automapa się zawiesza",
        "Aplikacja Automapa zawiesza się przy wyznaczaniu trasy",
    )
    .with_status(TicketStatus::InProgress)
    .with_tags(["automapa", "android"])
}

/// All fixtures, in id order.
pub fn sample_tickets() -> Vec<Ticket> {
    vec![printer_ticket(), defibrillator_ticket(), automapa_ticket()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ids_are_unique() {
        let tickets = sample_tickets();
        let mut ids: Vec<_> = tickets.iter().map(|t| t.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn only_defibrillator_is_resolved() {
        assert!(printer_ticket().solution.is_none());
        assert_eq!(defibrillator_ticket().status, TicketStatus::Resolved);
    }
}
