use strikewatch::error::Error;
use strikewatch::models::Direction;
use strikewatch::services::commands;
use strikewatch::store::AlertStore;

fn test_store() -> AlertStore {
    AlertStore::open_in_memory().expect("in-memory store")
}

#[test]
fn add_then_get_round_trips() {
    let store = test_store();

    let added = store
        .add("BTC", 100_000.0, Direction::Touch, "Key level", None)
        .unwrap();
    let fetched = store.get_by_id(added.id).unwrap().expect("alert exists");

    assert_eq!(fetched.symbol, "BTCUSDT");
    assert_eq!(fetched.strike_price, 100_000.0);
    assert_eq!(fetched.direction, Direction::Touch);
    assert_eq!(fetched.note, "Key level");
    assert_eq!(fetched.destination_override, None);
}

#[test]
fn add_normalizes_symbol_before_insert() {
    let store = test_store();

    let a = store.add("eth/usdt", 3_000.0, Direction::Up, "", None).unwrap();
    assert_eq!(a.symbol, "ETHUSDT");

    // list_by_symbol normalizes its argument the same way
    let listed = store.list_by_symbol("eth").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, a.id);
}

#[test]
fn add_rejects_non_positive_strike() {
    let store = test_store();

    let err = store.add("BTC", -5.0, Direction::Touch, "", None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = store.add("BTC", 0.0, Direction::Touch, "", None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // nothing was stored
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn list_all_orders_by_ascending_id() {
    let store = test_store();

    let a = store.add("BTC", 1.0, Direction::Touch, "", None).unwrap();
    let b = store.add("ETH", 2.0, Direction::Up, "", None).unwrap();
    let c = store.add("SOL", 3.0, Direction::Down, "", None).unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
    assert!(a.id < b.id && b.id < c.id);
}

#[test]
fn remove_is_idempotent() {
    let store = test_store();
    let a = store.add("BTC", 100.0, Direction::Touch, "", None).unwrap();

    assert!(store.remove(a.id).unwrap());
    assert!(!store.remove(a.id).unwrap());
    assert!(store.get_by_id(a.id).unwrap().is_none());
}

#[test]
fn distinct_symbols_reflects_active_alerts() {
    let store = test_store();
    assert!(store.distinct_symbols().unwrap().is_empty());

    store.add("BTC", 1.0, Direction::Touch, "", None).unwrap();
    store.add("BTC", 2.0, Direction::Up, "", None).unwrap();
    let e = store.add("ETH", 3.0, Direction::Down, "", None).unwrap();

    assert_eq!(store.distinct_symbols().unwrap(), vec!["BTCUSDT", "ETHUSDT"]);

    store.remove(e.id).unwrap();
    assert_eq!(store.distinct_symbols().unwrap(), vec!["BTCUSDT"]);
}

#[test]
fn settings_are_last_write_wins() {
    let store = test_store();
    assert_eq!(store.get_setting("announcement_channel_id").unwrap(), None);

    store.set_setting("announcement_channel_id", "111").unwrap();
    store.set_setting("announcement_channel_id", "222").unwrap();
    assert_eq!(
        store.get_setting("announcement_channel_id").unwrap(),
        Some("222".to_string())
    );
}

#[test]
fn destination_override_round_trips() {
    let store = test_store();
    let a = store
        .add("BTC", 50_000.0, Direction::Down, "", Some("987654"))
        .unwrap();
    let fetched = store.get_by_id(a.id).unwrap().unwrap();
    assert_eq!(fetched.destination_override.as_deref(), Some("987654"));
}

#[test]
fn add_command_rejects_invalid_direction() {
    let store = test_store();
    let err = commands::add_alert(&store, "BTC", 100.0, Some("sideways"), "", None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn add_command_defaults_direction_to_touch() {
    let store = test_store();
    let a = commands::add_alert(&store, "BTC", 100.0, None, "note", None).unwrap();
    assert_eq!(a.direction, Direction::Touch);
}

#[test]
fn poll_interval_defaults_and_bounds() {
    let store = test_store();

    // unset -> default
    assert_eq!(commands::poll_interval(&store).unwrap(), 60);

    // unparsable -> default
    store.set_setting("poll_interval_seconds", "soon").unwrap();
    assert_eq!(commands::poll_interval(&store).unwrap(), 60);

    // stored out-of-range values are clamped on read
    store.set_setting("poll_interval_seconds", "5").unwrap();
    assert_eq!(commands::poll_interval(&store).unwrap(), 30);
    store.set_setting("poll_interval_seconds", "9999").unwrap();
    assert_eq!(commands::poll_interval(&store).unwrap(), 300);

    // the setter rejects out-of-range values outright
    assert!(matches!(
        commands::set_poll_interval(&store, 10),
        Err(Error::Validation(_))
    ));
    commands::set_poll_interval(&store, 120).unwrap();
    assert_eq!(commands::poll_interval(&store).unwrap(), 120);
}

#[test]
fn default_destination_setting() {
    let store = test_store();
    assert_eq!(commands::default_destination(&store).unwrap(), None);

    commands::set_default_destination(&store, "123456").unwrap();
    assert_eq!(
        commands::default_destination(&store).unwrap(),
        Some("123456".to_string())
    );

    assert!(matches!(
        commands::set_default_destination(&store, "  "),
        Err(Error::Validation(_))
    ));
}

#[test]
fn format_alert_line_includes_note_when_present() {
    let store = test_store();
    let a = commands::add_alert(&store, "BTC", 100_000.0, None, "Key level", None).unwrap();
    let line = commands::format_alert_line(&a);
    assert!(line.contains("BTC/USDT"));
    assert!(line.contains("$100000.00"));
    assert!(line.contains("Key level"));

    let b = commands::add_alert(&store, "ETH", 3_000.0, Some("up"), "", None).unwrap();
    let line = commands::format_alert_line(&b);
    assert!(line.contains("(up)"));
    assert!(!line.contains('|'));
}
