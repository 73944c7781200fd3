//! Help system for relayout commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = topic_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'relayout help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
relayout — save and rebuild hy3 tiling layouts

Usage: relayout <command> [args...]

Commands:
  save [--dry-run]                 Capture every workspace to the layout file
  restore [options]                Rebuild a workspace's tiling tree
  show                             Summarise the saved layout
  help [topic]                     Show help

Restore options:
  -w, --workspace <id>   Workspace to rebuild (default: focused)
  -t, --top <n>          Force n windows in the top row
  -a, --all              Rebuild every saved workspace
  -n, --dry-run          Print the command plan without running it
      --json             Print the plan as JSON

Topics: layout, config

Run 'relayout help <command>' for detailed help on a specific command."
        .into()
}


fn topic_help(topic: &str) -> Option<String> {
    let text = match topic {
        "layout" => "\
How layouts are rebuilt

  Windows are grouped into rows by Y position (within 100 px of the
  row's first window) and ordered left to right. Windows with the exact
  same position and size are a tab group.

  Restore moves every window to the scratch workspace, then brings them
  back one at a time: row leaders are stacked in a vertical group, each
  row is a horizontal group, tab groups are filled last, and saved sizes
  are applied at the end.

  Saved windows are matched to live ones by class. Windows with no
  saved slot are added to the bottom row.",

        "config" => "\
Configuration file

  $RELAYOUT_CONFIG, or $XDG_CONFIG_HOME/relayout/config.yaml

  layout_path: ~/.config/hypr/saved_layout.json
  y_threshold: 100
  settle_delay_ms: 150
  arrive_delay_ms: 200
  scratch_workspace: 99
  notify: true
  launch_commands:
    kitty: kitty --single-instance",

        _ => return None,
    };
    Some(text.into())
}


fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "save" => "relayout save — capture every workspace\n\nUsage: relayout save [--dry-run]",
        "restore" => "relayout restore — rebuild a workspace\n\nUsage: relayout restore [-w <id>] [-t <n>] [--all] [--dry-run] [--json]",
        "show" => "relayout show — summarise the saved layout\n\nUsage: relayout show",
        "help" => "relayout help — show help\n\nUsage: relayout help [topic]",
        _ => return None,
    };
    Some(text.into())
}
