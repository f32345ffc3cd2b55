//! custom-select - drive a custom select widget from the command line.

mod script;

use anyhow::{bail, Context, Result};
use clap::Parser;
use custom_select::{Page, SelectConfig, WidgetId};
use dom::{Document, SerializeOptions};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use script::{parse_script, Step};

/// Build a custom select, play an interaction script on it and print the
/// resulting markup.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Option as VALUE or VALUE=LABEL (repeatable)
    #[arg(long = "option", value_name = "VALUE[=LABEL]")]
    options: Vec<String>,

    /// Value of the initially selected option
    #[arg(long)]
    selected: Option<String>,

    /// Comma-separated steps: key codes (Space, ArrowUp, ArrowDown, Enter,
    /// Escape), single characters, click:label, click:VALUE, blur or Tab,
    /// wait:MS
    #[arg(long, default_value = "")]
    script: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<String>,

    /// Pretty-print the markup
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const DEFAULT_OPTIONS: &[&str] = &["apple=Apple", "apricot=Apricot", "banana=Banana"];

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = run(&args)?;
    print!("{}", output);
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<SelectConfig> {
    let Some(path) = path else {
        return Ok(SelectConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path))
}

/// Split `VALUE[=LABEL]`; the label defaults to the value.
fn parse_option(entry: &str) -> (&str, &str) {
    entry.split_once('=').unwrap_or((entry, entry))
}

/// A document whose body holds one marked native select.
fn build_document(config: &SelectConfig, options: &[String], selected: Option<&str>) -> Result<Document> {
    let mut doc = Document::new();
    let native = doc.create_element_with_attributes("select", &[(config.marker_attribute.as_str(), "")]);
    doc.append_to_body(native);

    let mut found_selected = selected.is_none();
    for entry in options {
        let (value, label) = parse_option(entry);
        let option = doc.create_element_with_attributes("option", &[("value", value)]);
        if selected == Some(value) {
            found_selected = true;
            if let Some(elem) = doc.tree.get_element_mut(option) {
                elem.set_attribute("selected", "");
            }
        }
        doc.tree.set_text_content(option, label);
        doc.tree.append_child(native, option);
    }

    if !found_selected {
        bail!("--selected {:?} does not name an option", selected.unwrap_or_default());
    }
    Ok(doc)
}

fn play(page: &mut Page, widget: WidgetId, steps: &[Step]) -> Result<()> {
    let select = page.widget(widget).context("widget vanished")?;
    let (container, label) = (select.container(), select.label());
    page.focus(container)?;

    for step in steps {
        debug!(?step, "playing step");
        match step {
            Step::Key(_) | Step::Type(_) => {
                if let Some((key, code)) = step.key_event() {
                    page.key_down(&key, &code);
                }
            }
            Step::ClickLabel => {
                page.click(label)?;
            }
            Step::ClickOption(value) => {
                let item = page
                    .widget(widget)
                    .and_then(|w| w.options().iter().find(|o| &o.value == value))
                    .map(|o| o.item)
                    .with_context(|| format!("no option with value {:?}", value))?;
                page.click(item)?;
            }
            Step::Blur => page.blur(),
            Step::Wait(duration) => {
                page.advance(*duration);
            }
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let options: Vec<String> = if args.options.is_empty() {
        DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        args.options.clone()
    };
    let steps = parse_script(&args.script)?;

    let document = build_document(&config, &options, args.selected.as_deref())?;
    let mut page = Page::with_document(document, config);

    let report = page.enhance_all();
    if let Some((_, err)) = report.failed.first() {
        bail!("could not enhance select: {}", err);
    }
    let widget = *report.enhanced.first().context("nothing to enhance")?;
    info!(options = options.len(), steps = steps.len(), "custom select ready");

    play(&mut page, widget, &steps)?;

    let mut serialize = SerializeOptions::new();
    serialize.pretty = args.pretty;
    let mut output = dom::serialize_node(&page.document().tree, page.document().body, &serialize);
    output.push('\n');

    let value = page
        .widget(widget)
        .and_then(|w| w.value())
        .unwrap_or_default();
    output.push_str(&format!("selected: {}\n", value));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(argv: &[&str]) -> Result<String> {
        let mut full = vec!["custom-select"];
        full.extend_from_slice(argv);
        run(&Args::parse_from(full))
    }

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["custom-select"]);
        assert!(args.options.is_empty());
        assert!(args.selected.is_none());
        assert_eq!(args.script, "");
        assert!(!args.pretty);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_repeatable_options() {
        let args = Args::parse_from([
            "custom-select",
            "--option",
            "a=Alpha",
            "--option",
            "b",
            "--selected",
            "b",
            "-v",
        ]);
        assert_eq!(args.options, vec!["a=Alpha", "b"]);
        assert_eq!(args.selected.as_deref(), Some("b"));
        assert!(args.verbose);
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("a=Alpha"), ("a", "Alpha"));
        assert_eq!(parse_option("b"), ("b", "b"));
    }

    #[test]
    fn test_default_run() {
        let output = run_with(&[]).unwrap();
        assert!(output.contains(r#"<div class="custom-select-container" tabindex="0">"#));
        assert!(output.contains(r#"<span class="custom-select-value">Apple</span>"#));
        assert!(output.contains(r#"style="display: none""#));
        assert!(output.ends_with("selected: apple\n"));
    }

    #[test]
    fn test_script_type_ahead() {
        let output = run_with(&["--script", "a,p,r"]).unwrap();
        assert!(output.ends_with("selected: apricot\n"));

        let output = run_with(&["--script", "a,p,wait:500,b"]).unwrap();
        assert!(output.ends_with("selected: banana\n"));
    }

    #[test]
    fn test_script_open_and_click() {
        let output = run_with(&["--script", "click:label"]).unwrap();
        assert!(output.contains(r#"<ul class="custom-select-options show">"#));

        let output = run_with(&["--selected", "banana", "--script", "click:label,click:apricot"]).unwrap();
        assert!(output.contains(r#"<ul class="custom-select-options">"#));
        assert!(output.ends_with("selected: apricot\n"));
    }

    #[test]
    fn test_blur_stops_keys() {
        let output = run_with(&["--script", "blur,ArrowDown"]).unwrap();
        assert!(output.ends_with("selected: apple\n"));
    }

    #[test]
    fn test_tab_closes_and_leaves_widget() {
        let output = run_with(&["--script", "Space,Tab,ArrowDown"]).unwrap();
        assert!(output.contains(r#"<ul class="custom-select-options">"#));
        assert!(output.ends_with("selected: apple\n"));
    }

    #[test]
    fn test_bad_input() {
        assert!(run_with(&["--selected", "kiwi"]).is_err());
        assert!(run_with(&["--script", "click:kiwi"]).is_err());
        assert!(run_with(&["--script", "Home"]).is_err());
    }
}
