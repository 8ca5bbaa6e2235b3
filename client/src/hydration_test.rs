use super::*;

#[test]
fn starts_hydrating() {
    let coordinator = HydrationCoordinator::new();
    assert_eq!(coordinator.phase(), Phase::Hydrating);
    assert!(!coordinator.is_ready());
}

#[test]
fn mark_ready_transitions_to_ready() {
    let mut coordinator = HydrationCoordinator::new();
    coordinator.mark_ready();
    assert_eq!(coordinator.phase(), Phase::Ready);
    assert!(coordinator.is_ready());
}

#[test]
fn mark_ready_twice_stays_ready() {
    let mut coordinator = HydrationCoordinator::new();
    coordinator.mark_ready();
    coordinator.mark_ready();
    assert_eq!(coordinator.phase(), Phase::Ready);
}

#[test]
fn default_equals_new() {
    assert_eq!(HydrationCoordinator::default().phase(), HydrationCoordinator::new().phase());
}
