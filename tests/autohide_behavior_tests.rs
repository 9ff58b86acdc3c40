use overlay_scrollbar::api::{HoverSurface, ScrollbarConfig, ScrollbarEngine};
use overlay_scrollbar::core::{
    AutohideMode, AutohidePolicy, NodeId, Orientation, Rect, Size, VisibilityFlags,
};
use overlay_scrollbar::interaction::{HitTarget, PointerInput};
use overlay_scrollbar::platform::{HeadlessHost, ScrollDocument};

fn build_engine(mode: AutohideMode) -> (ScrollbarEngine<HeadlessHost>, NodeId) {
    let mut host = HeadlessHost::new(Size::new(1024.0, 768.0));
    let body = host.body().expect("body");
    let list = host.add_node(body);
    host.set_client_size(list, Size::new(300.0, 400.0));
    host.set_scroll_size(list, Size::new(300.0, 2000.0));
    let mount = host.add_node(body);
    host.set_stage_rect(Rect::new(290.0, 0.0, 10.0, 400.0));

    let config = ScrollbarConfig::default()
        .with_scroller(list)
        .with_autohide(500)
        .with_autohide_mode(mode);
    let mut engine = ScrollbarEngine::new(host, config).expect("engine init");
    engine.on_attach(mount);
    engine.settle();
    (engine, list)
}

fn hover(engine: &mut ScrollbarEngine<HeadlessHost>, surface: HoverSurface, entered: bool) {
    engine.host_mut().hover(surface, entered);
    engine.flush_events();
}

#[test]
fn autohiding_bar_starts_hidden() {
    let (engine, _) = build_engine(AutohideMode::All);
    assert!(engine.is_scrollable());
    assert!(!engine.is_visible());
    assert_eq!(engine.host().pending_timer_count(), 0);
}

#[test]
fn hover_shows_immediately_and_leave_hides_after_delay() {
    let (mut engine, _) = build_engine(AutohideMode::All);

    hover(&mut engine, HoverSurface::Scroller, true);
    assert!(engine.is_visible());
    assert!(engine.host().is_stage_visible());

    // hovering keeps the bar up indefinitely
    engine.advance_time(5_000);
    assert!(engine.is_visible());

    hover(&mut engine, HoverSurface::Scroller, false);
    engine.advance_time(499);
    assert!(engine.is_visible());
    engine.advance_time(1);
    assert!(!engine.is_visible());
    assert!(!engine.host().is_stage_visible());
}

#[test]
fn re_entering_before_the_delay_cancels_the_hide() {
    let (mut engine, _) = build_engine(AutohideMode::All);

    hover(&mut engine, HoverSurface::Scroller, true);
    hover(&mut engine, HoverSurface::Scroller, false);
    engine.advance_time(300);
    hover(&mut engine, HoverSurface::Scroller, true);
    assert_eq!(engine.host().pending_timer_count(), 0);

    engine.advance_time(2_000);
    assert!(engine.is_visible());
    assert_eq!(engine.host().visibility_writes, vec![true]);
}

#[test]
fn scroll_burst_reveals_then_fades() {
    let (mut engine, list) = build_engine(AutohideMode::Scroll);

    engine
        .host_mut()
        .user_scroll(list, Orientation::Vertical, 200.0);
    engine.settle();
    assert!(engine.is_visible());

    engine.advance_time(250);
    engine
        .host_mut()
        .user_scroll(list, Orientation::Vertical, 300.0);
    engine.settle();
    engine.advance_time(400);
    assert!(engine.is_visible());

    engine.advance_time(100);
    assert!(!engine.is_visible());
}

#[test]
fn hover_mode_ignores_scrolling() {
    let (mut engine, list) = build_engine(AutohideMode::Hover);

    engine
        .host_mut()
        .user_scroll(list, Orientation::Vertical, 200.0);
    engine.settle();
    assert!(!engine.is_visible());

    hover(&mut engine, HoverSurface::Scroller, true);
    assert!(engine.is_visible());
}

#[test]
fn scroll_mode_fades_even_while_hovering_the_scroller() {
    let (mut engine, list) = build_engine(AutohideMode::Scroll);

    hover(&mut engine, HoverSurface::Scroller, true);
    assert!(!engine.is_visible());

    engine
        .host_mut()
        .user_scroll(list, Orientation::Vertical, 200.0);
    engine.settle();
    assert!(engine.is_visible());
    engine.advance_time(500);
    assert!(!engine.is_visible());
}

#[test]
fn stage_hover_and_drag_hold_the_bar_on_screen() {
    let (mut engine, _) = build_engine(AutohideMode::Scroll);

    hover(&mut engine, HoverSurface::Stage, true);
    assert!(engine.is_visible());
    engine.advance_time(1_000);
    assert!(engine.is_visible());

    engine.pointer_down(PointerInput::primary(1, 295.0, 20.0, HitTarget::Thumb));
    hover(&mut engine, HoverSurface::Stage, false);
    engine.advance_time(1_000);
    assert!(engine.is_visible());

    engine.pointer_up(1);
    engine.advance_time(499);
    assert!(engine.is_visible());
    engine.advance_time(1);
    assert!(!engine.is_visible());
}

#[test]
fn explicit_hide_respects_active_hover() {
    let (mut engine, _) = build_engine(AutohideMode::All);

    engine.show();
    assert!(engine.is_visible());
    engine.hide();
    assert!(!engine.is_visible());

    hover(&mut engine, HoverSurface::Stage, true);
    engine.hide();
    assert!(engine.is_visible());
}

#[test]
fn disabling_autohide_pins_the_bar() {
    let (mut engine, _) = build_engine(AutohideMode::All);
    assert!(!engine.is_visible());

    engine
        .set_autohide(AutohidePolicy::Disabled)
        .expect("valid policy");
    assert!(engine.is_visible());
    engine.advance_time(10_000);
    assert!(engine.is_visible());

    assert!(
        engine
            .set_autohide(AutohidePolicy::Enabled { delay_ms: 0 })
            .is_err()
    );
}

#[test]
fn retargeting_while_hovered_lets_the_bar_fade() {
    let (mut engine, _) = build_engine(AutohideMode::All);
    let body = engine.host().body().expect("body");
    let other = engine.host_mut().add_node(body);
    engine
        .host_mut()
        .set_client_size(other, Size::new(300.0, 400.0));
    engine
        .host_mut()
        .set_scroll_size(other, Size::new(300.0, 3000.0));

    hover(&mut engine, HoverSurface::Scroller, true);
    assert!(engine.is_visible());

    engine.attach(other);
    engine.settle();
    assert!(!engine.visibility_state().flags.hover_scroller);

    engine.advance_time(10_000);
    assert!(!engine.is_visible());
}

#[test]
fn reattaching_after_a_hovered_detach_lets_the_bar_fade() {
    let (mut engine, _) = build_engine(AutohideMode::All);
    let mount = engine.mount().expect("mounted");

    hover(&mut engine, HoverSurface::Stage, true);
    assert!(engine.is_visible());

    engine.on_detach();
    assert_eq!(engine.visibility_state().flags, VisibilityFlags::default());

    engine.on_attach(mount);
    engine.settle();
    engine.advance_time(10_000);
    assert!(!engine.is_visible());

    engine.show();
    engine.hide();
    assert!(!engine.is_visible());
}
