//! Wombat CLI
//!
//! Parses an HTML file (or an inline string) and prints the repaired tree,
//! runs CSS selectors against it, or dumps it as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wombat_dom::{Document, NodeData, NodeId};
use wombat_html::{Dom, Options, print_tree};

/// Wombat: forgiving HTML parser and CSS-selector query tool
#[derive(Parser, Debug)]
#[command(name = "wombat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the parsed tree of a file
    wombat ./index.html

    # Parse inline markup
    wombat --html '<div><p>hi</p></div>'

    # Query with a CSS selector
    wombat ./index.html --select 'div > p.note'

    # Print only the matched text
    wombat ./index.html --select 'h1' --text

    # Dump the whole tree as JSON
    wombat ./index.html --json
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Run a CSS selector against the page and print the matches
    #[arg(short, long, value_name = "SELECTOR")]
    select: Option<String>,

    /// Print the text of each match instead of its markup
    #[arg(long)]
    text: bool,

    /// Dump matches (or the whole tree) as formatted JSON
    #[arg(long)]
    json: bool,

    /// Fail on malformed markup instead of repairing it
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let html = load_input(&cli)?;
    let options = Options::default().with_strict(cli.strict);
    let dom = Dom::load_str(&html, &options)?;

    if let Some(ref selector) = cli.select {
        return print_matches(&dom, selector, cli.text, cli.json);
    }

    if cli.json {
        let value = json_node(dom.document(), dom.root());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "=== DOM Tree ===".bold());
    print_tree(dom.document(), dom.root(), 0);
    println!();
    println!("{} nodes", dom.document().len());
    Ok(())
}

/// Load the markup from `--html` or the positional file path.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))
    } else {
        anyhow::bail!("pass a file path or --html '<markup>'")
    }
}

/// Run `selector` against the page and print each match.
fn print_matches(dom: &Dom, selector: &str, text: bool, json: bool) -> Result<()> {
    let matches = dom.find(selector);
    if json {
        let values: Vec<serde_json::Value> = matches
            .iter()
            .map(|&id| json_node(dom.document(), id))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }
    if matches.is_empty() {
        println!("{}", format!("no matches for '{selector}'").yellow());
        return Ok(());
    }
    for (index, &id) in matches.iter().enumerate() {
        if text {
            println!("{}", dom.document().inner_text(id)?);
        } else {
            let label = format!("[{index}]");
            println!("{} {}", label.green(), dom.document().outer_markup(id)?);
        }
    }
    Ok(())
}

/// Convert the subtree under `id` to a JSON value mirroring the tree shape:
/// elements carry `tagName`, `attributes` and `children`, text runs carry
/// `content`. Valueless attributes map to `null`.
fn json_node(document: &Document, id: NodeId) -> serde_json::Value {
    match document.get(id).map(|node| &node.data) {
        Some(NodeData::Element(tag)) => {
            let attributes: serde_json::Map<String, serde_json::Value> = tag
                .attributes()
                .iter()
                .map(|(name, attribute)| {
                    let value = attribute
                        .value
                        .as_ref()
                        .map_or(serde_json::Value::Null, |v| {
                            serde_json::Value::String(v.clone())
                        });
                    (name.clone(), value)
                })
                .collect();
            let children: Vec<serde_json::Value> = document
                .child_iter(id)
                .map(|child| json_node(document, child))
                .collect();
            serde_json::json!({
                "type": "element",
                "tagName": tag.name(),
                "attributes": attributes,
                "children": children,
            })
        }
        Some(NodeData::Text(text)) => serde_json::json!({
            "type": "text",
            "content": text.rendered(document.encoding()),
        }),
        None => serde_json::Value::Null,
    }
}
