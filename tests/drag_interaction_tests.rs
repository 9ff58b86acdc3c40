use overlay_scrollbar::api::{ScrollbarConfig, ScrollbarEngine};
use overlay_scrollbar::core::{NodeId, Orientation, Rect, ScrollBehavior, Size};
use overlay_scrollbar::interaction::{
    EventDisposition, HitTarget, InteractionMode, PointerButton, PointerInput,
};
use overlay_scrollbar::platform::{
    HeadlessHost, ObservedNode, ObservedTopic, ScrollDocument, Subscription,
};

const STAGE_TOP: f64 = 100.0;

// thumb 80px, stage travel 320px, scroll travel 1600px
fn build_engine() -> (ScrollbarEngine<HeadlessHost>, NodeId) {
    let mut host = HeadlessHost::new(Size::new(1024.0, 768.0));
    let body = host.body().expect("body");
    let list = host.add_node(body);
    host.set_client_size(list, Size::new(300.0, 400.0));
    host.set_scroll_size(list, Size::new(300.0, 2000.0));
    let mount = host.add_node(body);
    host.set_stage_rect(Rect::new(290.0, STAGE_TOP, 10.0, 400.0));

    let config = ScrollbarConfig::default().with_scroller(list);
    let mut engine = ScrollbarEngine::new(host, config).expect("engine init");
    engine.on_attach(mount);
    engine.settle();
    (engine, list)
}

fn press(pointer_id: i32, y: f64, hit: HitTarget) -> PointerInput {
    PointerInput::primary(pointer_id, 295.0, y, hit)
}

#[test]
fn track_click_jumps_thumb_center_to_pointer() {
    let (mut engine, list) = build_engine();
    let stage_extent = 400.0;
    let thumb = engine.geometry().thumb_extent;
    let expected = ((0.4 * stage_extent - thumb / 2.0) / engine.geometry().stage_max_delta)
        .clamp(0.0, 1.0);

    let disposition =
        engine.pointer_down(press(1, STAGE_TOP + 0.4 * stage_extent, HitTarget::Track));
    assert_eq!(disposition, EventDisposition::consumed());

    let write = *engine.host().scroll_writes.last().expect("jump write");
    assert_eq!(write.node, list);
    assert_eq!(write.behavior, ScrollBehavior::Smooth);
    assert_eq!(write.offset, expected * 1600.0);

    engine.settle();
    assert!((engine.progress() - expected).abs() <= 1e-9);
    assert_eq!(engine.drag_session().expect("session").start_progress, expected);
}

#[test]
fn thumb_drag_scrolls_proportionally_and_instantly() {
    let (mut engine, list) = build_engine();

    engine.pointer_down(press(4, STAGE_TOP + 20.0, HitTarget::Thumb));
    assert!(engine.host().scroll_writes.is_empty());
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
    assert!(engine.host().is_pointer_captured(4));
    assert!(
        engine
            .host()
            .is_observed(ObservedTopic::DragTracking, ObservedNode::Stage)
    );

    engine.pointer_move(press(4, STAGE_TOP + 20.0 + 160.0, HitTarget::Thumb));
    engine.settle();
    let write = *engine.host().scroll_writes.last().expect("drag write");
    assert_eq!(write.behavior, ScrollBehavior::Instant);
    assert_eq!(engine.host().scroll_offset(list, Orientation::Vertical), 800.0);
    assert_eq!(engine.progress(), 0.5);
    assert_eq!(engine.host().thumb_offset(), 160.0);

    engine.pointer_up(4);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(!engine.host().is_pointer_captured(4));
    assert!(
        !engine
            .host()
            .is_observed(ObservedTopic::DragTracking, ObservedNode::Stage)
    );
}

#[test]
fn drag_progress_is_clamped_at_both_ends() {
    let (mut engine, list) = build_engine();
    engine.pointer_down(press(1, STAGE_TOP + 10.0, HitTarget::Thumb));

    engine.pointer_move(press(1, 50_000.0, HitTarget::Thumb));
    engine.settle();
    assert_eq!(engine.host().scroll_offset(list, Orientation::Vertical), 1600.0);
    assert_eq!(engine.progress(), 1.0);

    engine.pointer_move(press(1, -50_000.0, HitTarget::Thumb));
    engine.settle();
    assert_eq!(engine.host().scroll_offset(list, Orientation::Vertical), 0.0);
    assert_eq!(engine.progress(), 0.0);
}

#[test]
fn mismatched_pointer_ids_are_ignored() {
    let (mut engine, _) = build_engine();
    engine.pointer_down(press(1, STAGE_TOP + 10.0, HitTarget::Thumb));

    engine.pointer_move(press(2, STAGE_TOP + 300.0, HitTarget::Thumb));
    engine.pointer_up(2);
    engine.pointer_cancel(2);
    assert!(engine.host().scroll_writes.is_empty());
    assert!(engine.is_dragging());
    assert!(engine.host().is_pointer_captured(1));

    let second = engine.pointer_down(press(2, STAGE_TOP + 300.0, HitTarget::Track));
    assert_eq!(second, EventDisposition::untouched());
    assert_eq!(engine.drag_session().expect("session").pointer_id, 1);

    engine.pointer_cancel(1);
    assert!(!engine.is_dragging());
}

#[test]
fn non_primary_buttons_do_not_start_a_drag() {
    let (mut engine, _) = build_engine();
    let input =
        press(1, STAGE_TOP + 200.0, HitTarget::Track).with_button(PointerButton::Secondary);

    assert_eq!(engine.pointer_down(input), EventDisposition::untouched());
    assert!(!engine.is_dragging());
    assert!(engine.host().scroll_writes.is_empty());
}

#[test]
fn lost_capture_still_ends_the_drag() {
    let (mut engine, _) = build_engine();
    engine.pointer_down(press(9, STAGE_TOP + 10.0, HitTarget::Thumb));
    engine.host_mut().lose_pointer_capture(9);

    engine.pointer_up(9);
    assert!(!engine.is_dragging());
    assert_eq!(engine.host().capture_releases, vec![9]);
    assert!(
        !engine
            .subscriptions()
            .contains(&Subscription::new(ObservedTopic::DragTracking, ObservedNode::Stage))
    );
}

#[test]
fn horizontal_track_click_uses_the_x_axis() {
    let mut host = HeadlessHost::new(Size::new(1024.0, 768.0));
    let body = host.body().expect("body");
    let strip = host.add_node(body);
    host.set_client_size(strip, Size::new(500.0, 100.0));
    host.set_scroll_size(strip, Size::new(2500.0, 100.0));
    let mount = host.add_node(body);
    // thumb 100px, stage travel 400px, scroll travel 2000px
    host.set_stage_rect(Rect::new(40.0, 90.0, 500.0, 10.0));

    let config = ScrollbarConfig::horizontal().with_scroller(strip);
    let mut engine = ScrollbarEngine::new(host, config).expect("engine init");
    engine.on_attach(mount);
    engine.settle();

    let click = PointerInput::primary(1, 40.0 + 0.4 * 500.0, 95.0, HitTarget::Track);
    assert_eq!(engine.pointer_down(click), EventDisposition::consumed());

    let write = *engine.host().scroll_writes.last().expect("jump write");
    assert_eq!(write.orientation, Orientation::Horizontal);
    assert_eq!(write.offset, 750.0);

    engine.settle();
    assert_eq!(engine.progress(), 0.375);
    assert_eq!(engine.host().thumb_offset(), 150.0);
    engine.pointer_up(1);
}
