use anyhow::{anyhow, Result};
use clap::{App as Cli, AppSettings, Arg, ArgMatches, SubCommand};
use fragmark::config::Config;
use fragmark::fetch::DirectoryFetcher;
use fragmark::preferences::{FileStore, PreferenceManager};
use fragmark::router::App;
use fragmark::surface::Screen;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let matches = Cli::new("fragmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a fragment-routed markdown site from the terminal")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("site")
                .long("site")
                .short("s")
                .takes_value(true)
                .help("Directory to search (upwards) for fragmark.yaml"),
        )
        .arg(
            Arg::with_name("prefers-dark")
                .long("prefers-dark")
                .help("Act as if the system prefers a dark color scheme"),
        )
        .subcommand(
            SubCommand::with_name("render")
                .about("Renders the page for a route token or #fragment")
                .arg(Arg::with_name("TOKEN").index(1)),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Searches titles, summaries and tags")
                .arg(Arg::with_name("QUERY").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("theme")
                .about("Shows or toggles the color theme")
                .arg(Arg::with_name("toggle").long("toggle")),
        )
        .subcommand(
            SubCommand::with_name("font")
                .about("Adjusts the font")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(SubCommand::with_name("bigger"))
                .subcommand(SubCommand::with_name("smaller"))
                .subcommand(
                    SubCommand::with_name("family").arg(
                        Arg::with_name("NAME").required(true).index(1),
                    ),
                ),
        )
        .get_matches();

    let start = match matches.value_of("site") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let config = Config::from_directory(&start)?;
    let mut preferences = PreferenceManager::new(
        FileStore::open(config.preferences_path())?,
        matches.is_present("prefers-dark"),
    );

    match matches.subcommand() {
        ("render", Some(m)) => {
            render(config, &preferences, m.value_of("TOKEN").unwrap_or(""))
        }
        ("search", Some(m)) => {
            search(config, m.value_of("QUERY").unwrap_or_default())
        }
        ("theme", Some(m)) => {
            if m.is_present("toggle") {
                preferences.toggle_theme()?;
            }
            println!("{}", preferences.preferences().theme.as_str());
            Ok(())
        }
        ("font", Some(m)) => font(&mut preferences, m),
        (name, _) => Err(anyhow!("Unknown command `{}`", name)),
    }
}

fn app(config: Config) -> App<DirectoryFetcher, Screen> {
    let fetcher = DirectoryFetcher::new(config.content_root());
    let screen = Screen::new(config.menu.clone());
    App::new(config, fetcher, screen)
}

fn render(
    config: Config,
    preferences: &PreferenceManager<FileStore>,
    fragment: &str,
) -> Result<()> {
    let mut app = app(config);
    app.apply_preferences(preferences.preferences());
    app.restore(fragment);

    let screen = app.into_surface();
    println!("<nav class=\"breadcrumbs\">{}</nav>", screen.breadcrumbs);
    if !screen.toc.is_empty() {
        println!("<nav class=\"toc\">{}</nav>", screen.toc);
    }
    println!("<main>{}</main>", screen.content);
    Ok(())
}

fn search(config: Config, query: &str) -> Result<()> {
    let mut app = app(config);
    app.search(query);
    println!("{}", app.surface().search_results);
    Ok(())
}

fn font(
    preferences: &mut PreferenceManager<FileStore>,
    matches: &ArgMatches,
) -> Result<()> {
    match matches.subcommand() {
        ("bigger", _) => println!("{}px", preferences.increase_font()?),
        ("smaller", _) => println!("{}px", preferences.decrease_font()?),
        ("family", Some(m)) => {
            let family = m.value_of("NAME").unwrap_or_default();
            preferences.set_font_family(family)?;
            println!("{}", family);
        }
        (name, _) => return Err(anyhow!("Unknown font command `{}`", name)),
    }
    Ok(())
}
