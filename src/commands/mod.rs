pub type CmdResult<T> = recase::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod fix;
pub mod languages;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (recase::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Fix(args) => dispatch!(args, global, fix),
        crate::Commands::Languages(args) => dispatch!(args, global, languages),
    }
}

/// Load settings from `--config` when given, otherwise start empty.
pub(crate) fn load_settings(config: Option<&str>) -> recase::Result<recase::CasingSettings> {
    match config {
        Some(path) => recase::CasingSettings::load(path),
        None => Ok(recase::CasingSettings::default()),
    }
}
