use super::core::MenuEngine;
use super::types::{Effect, MenuInput, Notice, NoticeLevel, View};
use super::utils::{read_text, LineEvent};
use crate::classifier::LinkClassifier;
use crate::clipboard::read_clipboard;
use crate::runner::ToolLocator;
use crate::{installer, probe, runner};
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use qt_core::Browser;
use std::io;
use tracing::{error, info, warn};

/// Interactive loop: draws the engine's screens with dialoguer and performs
/// the effects it asks for, until the user exits.
pub fn run_menu(
    classifier: LinkClassifier,
    locator: ToolLocator,
    cookie_browser: Option<Browser>,
) -> Result<()> {
    let mut engine = MenuEngine::new(classifier, cookie_browser, &locator.bin_dir);
    engine.set_clipboard(&read_clipboard());

    println!("\n📺 QuickTube");
    loop {
        print_notices(engine.take_notices());

        let input = prompt(&engine.view())?;
        match engine.apply(input) {
            Effect::None => {}
            Effect::Exit => break,
            Effect::RefreshClipboard => engine.set_clipboard(&read_clipboard()),
            Effect::LoadInfo(link) => {
                let result = probe::info_cli(&link, engine.session().cookie_browser, &locator);
                engine.info_loaded(result);
            }
            Effect::LoadFormats(link) => {
                let result = probe::run_cli(&link, engine.session().cookie_browser, &locator);
                engine.formats_loaded(result);
            }
            Effect::Run(inv) => {
                let result = runner::run_cli(&inv, &locator);
                if let Err(e) = &result {
                    warn!("Command failed: {}", e);
                }
                engine.run_finished(result);
            }
            Effect::Install(tools) => {
                let report = installer::run_cli(&tools, &locator.bin_dir);
                engine.install_finished(&report);
            }
        }
    }

    print_notices(engine.take_notices());
    info!("Menu closed");
    println!("👋 Bye!");
    Ok(())
}

fn prompt(view: &View) -> Result<MenuInput> {
    let result = match view {
        View::Choice {
            prompt,
            items,
            default,
        } => Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(*default)
            .interact_opt()
            .map(|picked| match picked {
                Some(i) => MenuInput::Select(i),
                None => MenuInput::Back,
            })
            .map_err(|dialoguer::Error::IO(e)| e),
        View::Text { prompt, initial } => read_text(prompt, initial).map(|event| match event {
            LineEvent::Submit(text) => MenuInput::Text(text),
            LineEvent::Cancel => MenuInput::Back,
        }),
    };

    match result {
        Ok(input) => Ok(input),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(MenuInput::Quit),
        Err(e) => Err(e).context("Terminal prompt failed"),
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => {
                info!("{}", notice.text);
                println!("ℹ️  {}", notice.text);
            }
            NoticeLevel::Success => {
                info!("{}", notice.text);
                println!("✔ {}", notice.text);
            }
            NoticeLevel::Warning => {
                warn!("{}", notice.text);
                eprintln!("⚠️  {}", notice.text);
            }
            NoticeLevel::Error => {
                error!("{}", notice.text);
                eprintln!("❌ {}", notice.text);
            }
        }
    }
}
