use gastro_events::{BusEvent, EventPayload, app_event};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TableBooked {
    table: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TableReleased {
    table: u32,
}

#[app_event]
#[derive(Debug)]
enum FloorEvent {
    TableBooked(TableBooked),
    TableReleased(TableReleased),
}

fn main() {
    let event: FloorEvent = TableBooked { table: 4 }.into();
    assert_eq!(event.kind(), FloorEventKind::TableBooked);
    assert_eq!(FloorEventKind::TableReleased.as_str(), "TABLE_RELEASED");
    assert_eq!(FloorEventKind::ALL.len(), 2);
    assert_eq!(TableBooked::from_event(&event), Some(&TableBooked { table: 4 }));
    assert!(TableReleased::from_event(&event).is_none());
    assert_eq!(
        "TABLE_BOOKED".parse::<FloorEventKind>().ok(),
        Some(FloorEventKind::TableBooked)
    );
}
