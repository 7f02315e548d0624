use clap::Args;
use serde::Serialize;

use recase::LanguageRegistry;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct LanguagesArgs {
    /// JSON settings file whose custom tables are listed too
    #[arg(long)]
    config: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesOutput {
    pub command: &'static str,
    pub languages: Vec<LanguageSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub name: String,
    pub aliases: Vec<String>,
    pub keywords: usize,
    pub delimiters: String,
}

pub fn run(
    args: LanguagesArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<LanguagesOutput> {
    let settings = crate::commands::load_settings(args.config.as_deref())?;
    let registry = LanguageRegistry::builtin().with_tables(settings.languages);

    let languages = registry
        .tables()
        .iter()
        .map(|t| LanguageSummary {
            name: t.name.clone(),
            aliases: t.aliases.clone(),
            keywords: t.keywords.len(),
            delimiters: t.delimiters.iter().collect(),
        })
        .collect();

    Ok((
        LanguagesOutput {
            command: "languages",
            languages,
        },
        0,
    ))
}
