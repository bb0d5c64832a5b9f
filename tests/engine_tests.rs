//! Selection engine behaviour driven through the scripted frontend
//!
//! Covers the outcome rules of the engine: mandatory menus, skip with
//! defaults, reset confirmation, interrupts and display ordering.

use std::cell::Cell;

use archselect::config::MenuConfig;
use archselect::frontend::{ConfirmAnswer, ScriptedFrontend};
use archselect::menu::{
    EngineState, KeyAction, MenuOption, PreviewBridge, ResultKind, Selection, SelectionEngine,
    SelectionResult,
};

fn text_menu(labels: &[&str], config: MenuConfig) -> SelectionEngine<'static, String> {
    SelectionEngine::from_labels(labels.iter().copied(), config).expect("valid menu")
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_sort_without_default() {
    let engine = text_menu(&["b", "a", "c"], MenuConfig::new("Pick"));
    assert_eq!(engine.labels(), vec!["a", "b", "c"]);
}

#[test]
fn test_sort_with_default_pinned() {
    let engine = text_menu(&["b", "a", "c"], MenuConfig::new("Pick").with_default("c"));
    assert_eq!(engine.labels(), vec!["c (default)", "a", "b"]);
}

#[test]
fn test_confirming_default_returns_plain_value() {
    let mut engine = text_menu(&["b", "a", "c"], MenuConfig::new("Pick").with_default("c"));
    let mut frontend = ScriptedFrontend::new([KeyAction::Confirm]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(result, SelectionResult::Selected(Selection::Single("c".to_string())));
}

// =============================================================================
// Skip and mandatory menus
// =============================================================================

#[test]
fn test_mandatory_skip_does_not_terminate() {
    let config = MenuConfig::new("Select a kernel").with_skip(false);
    let mut engine = text_menu(&["linux", "linux-lts", "linux-zen"], config);
    let mut frontend = ScriptedFrontend::new([
        KeyAction::Skip,
        KeyAction::Skip,
        KeyAction::NavigateDown,
        KeyAction::Confirm,
    ]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(
        result,
        SelectionResult::Selected(Selection::Single("linux-lts".to_string()))
    );
    assert_eq!(frontend.views().len(), 4);
    assert_eq!(frontend.views()[1].status.as_deref(), Some("Selection is mandatory"));
    assert!(frontend.views()[0].title.starts_with("* "));
    assert_eq!(frontend.remaining(), 0);
}

#[test]
fn test_mandatory_skip_only_is_not_an_outcome() {
    let config = MenuConfig::new("Select a kernel").with_skip(false);
    let mut engine = text_menu(&["linux", "linux-lts", "linux-zen"], config);
    let mut frontend = ScriptedFrontend::new([KeyAction::Skip]);

    // The queue runs dry after the rejected skip, which interrupts
    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(result, SelectionResult::Interrupted);
}

#[test]
fn test_skip_without_default() {
    let mut engine = text_menu(&["a", "b"], MenuConfig::new("Pick"));
    let mut frontend = ScriptedFrontend::new([KeyAction::Skip]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(result, SelectionResult::Skipped(None));
    assert_eq!(engine.state(), EngineState::Resolved(ResultKind::Skipped));
}

#[test]
fn test_multi_skip_with_default_and_preset() {
    let config = MenuConfig::new("Pick").with_multi(true).with_default("X");
    let mut engine = text_menu(&["X", "Y", "Z"], config).with_presets(["X"]);
    assert_eq!(engine.checked(), vec![0]);

    let mut frontend = ScriptedFrontend::new([KeyAction::Skip]);
    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(
        result,
        SelectionResult::Skipped(Some(Selection::Multi(vec!["X".to_string()])))
    );
}

#[test]
fn test_skip_on_unskippable_menu_with_default() {
    let config = MenuConfig::new("Pick").with_skip(false).with_default("b");
    let mut engine = text_menu(&["a", "b"], config);
    let mut frontend = ScriptedFrontend::new([KeyAction::Skip]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(
        result,
        SelectionResult::Skipped(Some(Selection::Single("b".to_string())))
    );
}

// =============================================================================
// Reset and interrupt
// =============================================================================

#[test]
fn test_interrupt_without_reset_enabled() {
    let mut engine = text_menu(&["a", "b"], MenuConfig::new("Pick"));
    let mut frontend = ScriptedFrontend::new([KeyAction::Reset, KeyAction::Interrupt]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(result, SelectionResult::Interrupted);
    assert_eq!(result.kind(), ResultKind::Interrupted);
    assert!(frontend.questions().is_empty());
}

#[test]
fn test_reset_without_warning() {
    let config = MenuConfig::new("Pick").with_reset(None);
    let mut engine = text_menu(&["a", "b"], config);
    let mut frontend = ScriptedFrontend::new([KeyAction::Reset]);

    assert_eq!(engine.run(&mut frontend).unwrap(), SelectionResult::Reset);
    assert!(frontend.questions().is_empty());
}

#[test]
fn test_reset_warning_declined_then_accepted() {
    let config =
        MenuConfig::new("Pick").with_reset(Some("Reset the disk layout?".to_string()));
    let mut engine = text_menu(&["a", "b"], config);
    let mut frontend = ScriptedFrontend::new([KeyAction::Reset, KeyAction::Reset])
        .with_answers([ConfirmAnswer::No, ConfirmAnswer::Yes]);

    assert_eq!(engine.run(&mut frontend).unwrap(), SelectionResult::Reset);
    assert_eq!(frontend.questions().len(), 2);
    assert_eq!(frontend.questions()[0], "Reset the disk layout?");
    assert_eq!(frontend.views().len(), 2);
}

#[test]
fn test_interrupt_at_reset_warning() {
    let config =
        MenuConfig::new("Pick").with_reset(Some("Reset the disk layout?".to_string()));
    let mut engine = text_menu(&["a", "b"], config);
    let mut frontend = ScriptedFrontend::new([KeyAction::Reset, KeyAction::Confirm])
        .with_answers([ConfirmAnswer::Interrupted]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(result, SelectionResult::Interrupted);
    assert_eq!(engine.state(), EngineState::Resolved(ResultKind::Interrupted));
    assert_eq!(frontend.questions().len(), 1);
    // The queued confirm is never reached
    assert_eq!(frontend.remaining(), 1);
}

#[test]
fn test_engine_runs_once() {
    let mut engine = text_menu(&["a"], MenuConfig::new("Pick"));
    let mut frontend = ScriptedFrontend::new([KeyAction::Confirm]);
    engine.run(&mut frontend).unwrap();

    let err = engine.run(&mut frontend).unwrap_err();
    assert!(err.is_config());
}

// =============================================================================
// Multi-select
// =============================================================================

#[test]
fn test_multi_selection_in_display_order() {
    let config = MenuConfig::new("Packages").with_multi(true);
    let mut engine = text_menu(&["vim", "git", "htop"], config);
    // Display order: git, htop, vim
    let mut frontend = ScriptedFrontend::new([
        KeyAction::End,
        KeyAction::Toggle,
        KeyAction::Home,
        KeyAction::Toggle,
        KeyAction::Confirm,
    ]);

    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(
        result,
        SelectionResult::Selected(Selection::Multi(vec!["git".to_string(), "vim".to_string()]))
    );
    assert_eq!(frontend.last_view().unwrap().checked, vec![0, 2]);
}

#[test]
fn test_toggle_twice_unchecks() {
    let config = MenuConfig::new("Packages").with_multi(true);
    let mut engine = text_menu(&["a", "b"], config).with_presets(["b"]);
    let mut frontend = ScriptedFrontend::new([
        KeyAction::NavigateDown,
        KeyAction::Toggle,
        KeyAction::Confirm,
    ]);

    // Unchecking the only preset leaves nothing checked, so focus decides
    let result = engine.run(&mut frontend).unwrap();
    assert_eq!(
        result,
        SelectionResult::Selected(Selection::Multi(vec!["b".to_string()]))
    );
}

// =============================================================================
// Typed values and previews
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Mirror {
    country: &'static str,
    latency_ms: u32,
}

#[test]
fn test_typed_values_with_preview() {
    let calls = Cell::new(0);
    let options = vec![
        MenuOption::new("Germany", Mirror { country: "DE", latency_ms: 20 }),
        MenuOption::new("Sweden", Mirror { country: "SE", latency_ms: 35 }),
    ];
    let mut engine = SelectionEngine::new(options, MenuConfig::new("Mirror region"))
        .unwrap()
        .with_preview(PreviewBridge::new(|mirror: &Mirror| {
            calls.set(calls.get() + 1);
            Some(format!("{} ms", mirror.latency_ms))
        }));

    let mut frontend = ScriptedFrontend::new([
        KeyAction::Home,
        KeyAction::NavigateDown,
        KeyAction::Confirm,
    ]);
    let result = engine.run(&mut frontend).unwrap();

    let previews: Vec<Option<&str>> = frontend
        .views()
        .iter()
        .map(|view| view.preview.as_deref())
        .collect();
    assert_eq!(previews, vec![Some("20 ms"), Some("20 ms"), Some("35 ms")]);
    assert_eq!(calls.get(), 2);

    let mirror = result.value().unwrap().single().unwrap();
    assert_eq!(mirror.country, "SE");
}

#[test]
fn test_result_json_shape() {
    let selected: SelectionResult<String> =
        SelectionResult::Selected(Selection::Single("grub".to_string()));
    assert_eq!(
        serde_json::to_value(&selected).unwrap(),
        serde_json::json!({"type": "selected", "value": "grub"})
    );

    let skipped: SelectionResult<String> =
        SelectionResult::Skipped(Some(Selection::Multi(vec!["X".to_string()])));
    assert_eq!(
        serde_json::to_value(&skipped).unwrap(),
        serde_json::json!({"type": "skipped", "value": ["X"]})
    );

    let interrupted: SelectionResult<String> = SelectionResult::Interrupted;
    assert_eq!(
        serde_json::to_value(&interrupted).unwrap(),
        serde_json::json!({"type": "interrupted"})
    );
}

#[test]
fn test_footer_hints_follow_config() {
    let mut engine = text_menu(&["a"], MenuConfig::new("Pick").with_reset(None));
    let mut frontend = ScriptedFrontend::new([KeyAction::Confirm]);
    engine.run(&mut frontend).unwrap();

    let hints = &frontend.views()[0].hints;
    assert!(hints.contains("Navigate"));
    assert!(hints.contains("Reset"));
}
