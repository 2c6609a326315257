// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2chat::{
    load_all_content, load_database_content, load_page_content, parse_selection, AppError,
    ChatConfig, ChatSession, CommandLineInput, ContentSource, GeminiClient, NotionHttpClient,
    NotionRepository, ObjectSummary, Selection, TextGenerator,
};
use std::fs;
use std::io::{self, BufRead, Write};

const RESPONSE_RULE_WIDTH: usize = 60;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2chat.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("console", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(console_level.max(LevelFilter::Info)),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Prints `question` and reads one trimmed line; `None` at end of input.
fn prompt_line(question: &str) -> Option<String> {
    print!("{}", question);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn print_listing(pages: &[ObjectSummary], databases: &[ObjectSummary]) {
    let mut number = 0;
    if !pages.is_empty() {
        println!("\nAvailable pages:");
        for page in pages {
            number += 1;
            println!("{}. {} ({})", number, page.title, page.kind);
        }
    }
    if !databases.is_empty() {
        println!("\nAvailable databases:");
        for database in databases {
            number += 1;
            println!("{}. {} ({})", number, database.title, database.kind);
        }
    }
}

/// Loads every listed object, reporting progress and skipped items.
async fn load_everything(
    notion: &dyn NotionRepository,
    config: &ChatConfig,
    pages: &[ObjectSummary],
    databases: &[ObjectSummary],
) -> String {
    println!("\nExtracting content from all pages and databases...");
    let aggregated = load_all_content(notion, pages, databases, config.load, |object, i, n| {
        let kind = object.kind.to_string().to_lowercase();
        println!("Processing {} {}/{}: {}", kind, i, n, object.title);
    })
    .await;

    for failure in &aggregated.failures {
        println!("Skipped {} '{}': {}", failure.kind, failure.title, failure.message);
    }
    report_warnings(aggregated.warnings.len());
    aggregated.text
}

fn report_warnings(count: usize) {
    if count > 0 {
        println!(
            "Note: {} nested block lists could not be read; see the log for details.",
            count
        );
    }
}

/// Builds the chat context; `None` when the user quits at the menu.
async fn load_context(
    notion: &NotionHttpClient,
    config: &ChatConfig,
) -> Result<Option<String>, AppError> {
    match &config.source {
        ContentSource::Page(id) => {
            let content = load_page_content(notion, id, config.load.depth).await?;
            report_warnings(content.warnings.len());
            Ok(Some(content.text))
        }
        ContentSource::Database(id) => Ok(Some(
            load_database_content(notion, id, config.load.row_limit).await?,
        )),
        ContentSource::All => {
            let pages = notion.list_accessible_pages().await?;
            let databases = notion.list_accessible_databases().await?;
            Ok(Some(load_everything(notion, config, &pages, &databases).await))
        }
        ContentSource::Menu => choose_from_menu(notion, config).await,
    }
}

async fn choose_from_menu(
    notion: &NotionHttpClient,
    config: &ChatConfig,
) -> Result<Option<String>, AppError> {
    println!("Fetching accessible Notion pages...");
    let pages = notion.list_accessible_pages().await?;
    println!("Fetching accessible Notion databases...");
    let databases = notion.list_accessible_databases().await?;

    if pages.is_empty() && databases.is_empty() {
        println!("No accessible pages or databases found.");
        return Ok(None);
    }
    print_listing(&pages, &databases);

    let total = pages.len() + databases.len();
    loop {
        let Some(choice) = prompt_line(&format!(
            "\nEnter item number (1-{}), 'all' for all content, or 'q' to quit: ",
            total
        )) else {
            return Ok(None);
        };

        match parse_selection(&choice, total) {
            Ok(Selection::Quit) => return Ok(None),
            Ok(Selection::All) => {
                return Ok(Some(load_everything(notion, config, &pages, &databases).await));
            }
            Ok(Selection::Item(index)) => {
                let object = pages
                    .iter()
                    .chain(databases.iter())
                    .nth(index)
                    .ok_or_else(|| AppError::InternalError {
                        message: format!("selection {} outside listing", index + 1),
                        source: None,
                    })?;
                println!("\nLoading '{}'...", object.title);
                let content =
                    notion2chat::load_object_content(notion, object, config.load).await?;
                report_warnings(content.warnings.len());
                return Ok(Some(content.text));
            }
            Err(invalid) => println!("{}", invalid),
        }
    }
}

fn print_response(response: &str) {
    println!("\nResponse:");
    println!("{}", response);
    println!("{}", "=".repeat(RESPONSE_RULE_WIDTH));
}

async fn chat_loop(session: &mut ChatSession, generator: &dyn TextGenerator) {
    println!("\nReady to chat! Ask about your Notion content.");
    println!("Type 'q' to quit, ':history' to review this session.");

    while let Some(query) = prompt_line("\nYour query: ") {
        if query.eq_ignore_ascii_case("q") {
            break;
        }
        if query.is_empty() {
            println!("Please enter a valid query.");
            continue;
        }
        if query == ":history" {
            for (i, turn) in session.history().iter().enumerate() {
                println!("\n[{}] {}\n{}", i + 1, turn.query, turn.response);
            }
            continue;
        }

        let response = session.ask(generator, &query).await;
        print_response(response);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;
    println!("notion2chat: ask questions about your Notion pages and databases");

    let config = ChatConfig::resolve(cli, prompt_line)?;
    let notion = NotionHttpClient::new(&config.notion_api_key)?;
    let gemini = GeminiClient::new(
        config.model_api_key.clone(),
        &config.model,
        config.model_timeout,
    )?;
    log::info!("Using model {}", gemini.model());

    let context = match load_context(&notion, &config).await {
        Ok(Some(context)) => context,
        Ok(None) => {
            println!("Goodbye!");
            return Ok(());
        }
        Err(e) if e.is_not_found() => {
            eprintln!("Make sure the page or database is shared with your Notion integration.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    log::info!("Context ready: {} chars", context.len());

    let mut session = ChatSession::new(context);

    if config.queries.is_empty() {
        chat_loop(&mut session, &gemini).await;
        println!("Goodbye!");
    } else {
        for query in &config.queries {
            println!("\nYour query: {}", query);
            let response = session.ask(&gemini, query).await;
            print_response(response);
        }
    }

    Ok(())
}
