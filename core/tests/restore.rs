use std::rc::Rc;

use pretty_assertions::assert_eq;

use relayout_core::command::Command;
use relayout_core::layout::executor::{DryRunExecutor, Executor, WmExecutor};
use relayout_core::layout::restore::{plan_workspace, Outcome, RestoreOptions};
use relayout_core::notify::Recorded;
use relayout_core::response::Response;
use relayout_core::sys::Sys;
use relayout_core::types::config::Settings;
use relayout_core::types::layout::{SavedLayout, SavedWindow, SavedWorkspace};
use relayout_core::types::window::{Monitor, WindowRecord, WorkspaceId};
use relayout_core::wm::fake::FakeWm;
use relayout_core::wm::{Dispatch, GroupDirection, WmClient};


fn window(addr: &str, class: &str, ws: WorkspaceId, at: [i32; 2], size: [i32; 2]) -> WindowRecord {
    WindowRecord {
        address: addr.into(),
        class: class.into(),
        title: String::new(),
        at,
        size,
        workspace: ws,
        monitor: "DP-1".into(),
        floating: false,
    }
}


fn saved(class: &str, at: [i32; 2], size: [i32; 2]) -> SavedWindow {
    SavedWindow {
        class: class.into(),
        title: String::new(),
        at,
        size,
        tab_group: None,
        cmd: None,
    }
}


fn monitor(name: &str, focused: bool, ws: WorkspaceId) -> Monitor {
    Monitor {
        id: 0,
        name: name.into(),
        focused,
        active_workspace: ws,
    }
}


fn instant(dir: &tempfile::TempDir) -> Settings {
    Settings {
        layout_path: dir.path().join("saved_layout.json"),
        settle_delay_ms: 0,
        arrive_delay_ms: 0,
        notify: false,
        ..Settings::default()
    }
}


fn opts() -> RestoreOptions {
    RestoreOptions {
        top: None,
        y_threshold: 100,
        scratch: 99,
    }
}


fn focus(a: &str) -> Dispatch {
    Dispatch::Focus { address: a.into() }
}

fn wrap(direction: GroupDirection) -> Dispatch {
    Dispatch::WrapGroup { direction }
}

fn insert(a: &str, ws: WorkspaceId, silent: bool) -> Dispatch {
    Dispatch::InsertWindow {
        address: a.into(),
        workspace: ws,
        silent,
    }
}


#[test]
fn two_terminals_over_a_browser() {
    let layout = SavedWorkspace {
        monitor: "DP-1".into(),
        windows: vec![
            saved("term", [0, 0], [800, 600]),
            saved("term", [810, 0], [800, 600]),
            saved("browser", [0, 610], [1610, 500]),
        ],
    };
    // Whatever the current geometry, the saved layout wins.
    let live = vec![
        window("t1", "term", 1, [0, 0], [530, 1100]),
        window("t2", "term", 1, [540, 0], [530, 1100]),
        window("b", "browser", 1, [1080, 0], [530, 1100]),
    ];
    let mut wm = FakeWm::new(vec![monitor("DP-1", true, 1)], live.clone());

    let outcome = plan_workspace(&live, 1, Some(&layout), &opts());
    let plan = outcome.plan().unwrap().clone();
    let dir = tempfile::tempdir().unwrap();
    WmExecutor::new(&mut wm, &instant(&dir)).execute(&plan).unwrap();

    assert_eq!(
        wm.log().to_vec(),
        vec![
            insert("t1", 99, true),
            insert("t2", 99, true),
            insert("b", 99, true),
            Dispatch::SwitchWorkspace { id: 1 },
            insert("t1", 1, false),
            focus("t1"),
            wrap(GroupDirection::Vertical),
            insert("b", 1, false),
            focus("t1"),
            wrap(GroupDirection::Horizontal),
            insert("t2", 1, false),
            focus("b"),
            Dispatch::Resize { address: "t1".into(), w: 800, h: 600 },
            Dispatch::Resize { address: "t2".into(), w: 800, h: 600 },
            Dispatch::Resize { address: "b".into(), w: 1610, h: 500 },
        ]
    );
    assert_eq!(wm.shape(1), "V[H[t1,t2],b]");
    assert_eq!(wm.shape(99), "");
    assert_eq!(wm.size_of("b"), Some([1610, 500]));
}


#[test]
fn five_windows_without_layout_split_three_over_two() {
    let live: Vec<WindowRecord> = (1..=5)
        .map(|i| window(&format!("w{}", i), "term", 2, [0, 0], [100, 100]))
        .collect();
    let mut wm = FakeWm::new(vec![monitor("DP-1", true, 2)], live.clone());
    let outcome = plan_workspace(&live, 2, None, &opts());
    let dir = tempfile::tempdir().unwrap();
    WmExecutor::new(&mut wm, &instant(&dir))
        .execute(outcome.plan().unwrap())
        .unwrap();
    assert_eq!(wm.shape(2), "V[H[w1,w2,w3],H[w4,w5]]");
}


#[test]
fn three_rows_stack_in_order() {
    let layout = SavedWorkspace {
        monitor: "DP-1".into(),
        windows: vec![
            saved("a", [0, 0], [1600, 300]),
            saved("b", [0, 310], [790, 300]),
            saved("c", [800, 310], [790, 300]),
            saved("d", [0, 620], [1600, 300]),
        ],
    };
    let live = vec![
        window("0xd", "d", 1, [0, 0], [100, 100]),
        window("0xc", "c", 1, [0, 0], [100, 100]),
        window("0xb", "b", 1, [0, 0], [100, 100]),
        window("0xa", "a", 1, [0, 0], [100, 100]),
    ];
    let mut wm = FakeWm::new(vec![monitor("DP-1", true, 1)], live.clone());
    let outcome = plan_workspace(&live, 1, Some(&layout), &opts());
    let dir = tempfile::tempdir().unwrap();
    WmExecutor::new(&mut wm, &instant(&dir))
        .execute(outcome.plan().unwrap())
        .unwrap();
    assert_eq!(wm.shape(1), "V[0xa,H[0xb,0xc],0xd]");
}


#[test]
fn tab_group_is_rebuilt_as_tabs() {
    let mut windows = vec![
        saved("firefox", [0, 0], [800, 1100]),
        saved("slack", [0, 0], [800, 1100]),
        saved("kitty", [810, 0], [800, 1100]),
    ];
    windows[0].tab_group = Some(0);
    windows[1].tab_group = Some(0);
    let layout = SavedWorkspace {
        monitor: "DP-1".into(),
        windows,
    };
    let live = vec![
        window("k", "kitty", 1, [0, 0], [100, 100]),
        window("s", "slack", 1, [0, 0], [100, 100]),
        window("f", "firefox", 1, [0, 0], [100, 100]),
    ];
    let mut wm = FakeWm::new(vec![monitor("DP-1", true, 1)], live.clone());
    let outcome = plan_workspace(&live, 1, Some(&layout), &opts());
    let dir = tempfile::tempdir().unwrap();
    WmExecutor::new(&mut wm, &instant(&dir))
        .execute(outcome.plan().unwrap())
        .unwrap();
    assert_eq!(wm.shape(1), "H[T[f,s],k]");
}


#[test]
fn fewer_than_two_windows_issue_nothing() {
    let live = vec![window("only", "term", 1, [0, 0], [100, 100])];
    let outcome = plan_workspace(&live, 1, None, &opts());
    assert!(matches!(outcome, Outcome::NothingToDo { windows: 1, .. }));

    let dir = tempfile::tempdir().unwrap();
    let notes = Rc::new(Recorded::default());
    let mut sys = Sys::new(FakeWm::new(vec![monitor("DP-1", true, 1)], live), instant(&dir))
        .with_notifier(notes.clone());
    let resp = sys.execute(Command::Restore {
        workspace: Some(1),
        top: None,
        all: false,
        dry_run: false,
    });
    assert_eq!(
        resp,
        Response::noop("Only 1 window(s) on workspace 1, nothing to rearrange.")
    );
    assert!(sys.client().log().is_empty());
    assert_eq!(
        notes.sent(),
        vec!["Nothing to rearrange: Only 1 window(s) on workspace 1, nothing to rearrange.".to_string()]
    );
}


#[test]
fn save_then_restore_puts_windows_back_in_their_slots() {
    let live = vec![
        window("0x2", "kitty", 1, [810, 0], [800, 600]),
        window("0x1", "kitty", 1, [0, 0], [800, 600]),
        window("0x3", "firefox", 1, [0, 610], [1610, 500]),
    ];
    let dir = tempfile::tempdir().unwrap();
    let mut sys = Sys::new(FakeWm::new(vec![monitor("DP-1", true, 1)], live), instant(&dir));
    assert_eq!(sys.execute(Command::Save { dry_run: false }).exit_code(), 0);

    let resp = sys.execute(Command::Restore {
        workspace: None,
        top: None,
        all: false,
        dry_run: false,
    });
    assert_eq!(resp.exit_code(), 0);
    assert_eq!(sys.client().shape(1), "V[H[0x1,0x2],0x3]");
    assert_eq!(sys.client().size_of("0x1"), Some([800, 600]));
    assert_eq!(sys.client().size_of("0x3"), Some([1610, 500]));
}


#[test]
fn restore_all_rebuilds_each_workspace_and_returns_monitors() {
    let dir = tempfile::tempdir().unwrap();
    let settings = instant(&dir);

    let mut layout = SavedLayout::default();
    layout.workspaces.insert(
        1,
        SavedWorkspace {
            monitor: "DP-1".into(),
            windows: vec![saved("kitty", [0, 0], [800, 600]), saved("kitty", [810, 0], [800, 600])],
        },
    );
    layout.workspaces.insert(
        4,
        SavedWorkspace {
            monitor: "HDMI-A-1".into(),
            windows: vec![saved("mpv", [0, 0], [1920, 500]), saved("firefox", [0, 510], [1920, 500])],
        },
    );
    layout.active_workspaces.insert("DP-1".into(), 1);
    layout.active_workspaces.insert("HDMI-A-1".into(), 4);
    layout.active_workspaces.insert("eDP-1".into(), 7);
    relayout_core::layout::store::LayoutStore::new(&settings.layout_path)
        .save(&layout)
        .unwrap();

    let live = vec![
        window("k1", "kitty", 1, [0, 0], [100, 100]),
        window("k2", "kitty", 1, [0, 0], [100, 100]),
        window("ff", "firefox", 4, [0, 0], [100, 100]),
        window("mv", "mpv", 4, [0, 0], [100, 100]),
    ];
    let monitors = vec![monitor("DP-1", false, 2), monitor("HDMI-A-1", true, 3)];
    let notes = Rc::new(Recorded::default());
    let mut sys = Sys::new(FakeWm::new(monitors, live), settings).with_notifier(notes.clone());

    let resp = sys.execute(Command::Restore {
        workspace: None,
        top: None,
        all: true,
        dry_run: false,
    });
    assert_eq!(resp.exit_code(), 0);
    assert_eq!(sys.client().shape(1), "H[k1,k2]");
    assert_eq!(sys.client().shape(4), "V[mv,ff]");

    let tail: Vec<Dispatch> = sys.client().log().iter().rev().take(5).rev().cloned().collect();
    assert_eq!(
        tail,
        vec![
            Dispatch::FocusMonitor { name: "DP-1".into() },
            Dispatch::SwitchWorkspace { id: 1 },
            Dispatch::FocusMonitor { name: "HDMI-A-1".into() },
            Dispatch::SwitchWorkspace { id: 4 },
            Dispatch::FocusMonitor { name: "HDMI-A-1".into() },
        ]
    );
    let monitors = sys.client().monitors().unwrap();
    assert_eq!(monitors[0].active_workspace, 1);
    assert_eq!(monitors[1].active_workspace, 4);
    assert!(monitors[1].focused);
    assert_eq!(notes.sent().len(), 1);
    assert!(notes.sent()[0].starts_with("Layout restored: Workspace 1:"));
}


#[test]
fn dry_run_executor_matches_live_dispatches() {
    let live = vec![
        window("a", "term", 1, [0, 0], [100, 100]),
        window("b", "term", 1, [0, 0], [100, 100]),
        window("c", "term", 1, [0, 0], [100, 100]),
        window("d", "term", 1, [0, 0], [100, 100]),
    ];
    let outcome = plan_workspace(&live, 1, None, &opts());
    let plan = outcome.plan().unwrap();

    let mut dry = DryRunExecutor::new();
    dry.execute(plan).unwrap();

    let mut wm = FakeWm::new(vec![monitor("DP-1", true, 1)], live.clone());
    let dir = tempfile::tempdir().unwrap();
    WmExecutor::new(&mut wm, &instant(&dir)).execute(plan).unwrap();

    assert_eq!(dry.dispatches(), wm.log().to_vec());
    assert_eq!(wm.shape(1), "V[H[a,b],H[c,d]]");
}
