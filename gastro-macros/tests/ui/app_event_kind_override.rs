use gastro_events::{BusEvent, app_event};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuReloaded {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSoldOut {
    pub dish_id: String,
}

#[app_event(kind = MenuSignal)]
#[serde(tag = "kind", content = "payload")]
pub enum MenuEvent {
    #[event(kind = "MENU_REFRESH")]
    MenuReloaded(MenuReloaded),
    DishSoldOut(DishSoldOut),
}

fn main() {
    let event = MenuEvent::MenuReloaded(MenuReloaded { reason: None });
    assert_eq!(event.kind(), MenuSignal::MenuReloaded);
    assert_eq!(MenuSignal::MenuReloaded.to_string(), "MENU_REFRESH");
    assert_eq!(MenuSignal::DishSoldOut.as_str(), "DISH_SOLD_OUT");
    assert!("MENU_RELOADED".parse::<MenuSignal>().is_err());
}
