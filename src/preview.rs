use crate::structure::{Node, Structure};
use colored::Colorize;
use std::path::Path;

/// Print the structure with a nice ASCII style.
fn print_tree(structure: &Structure, prefix: &str) {
    let len = structure.0.len();

    for (i, (name, node)) in structure.iter().enumerate() {
        let is_last = i == len - 1;

        let connector = if is_last {
            "└── ".yellow()
        } else {
            "├── ".yellow()
        };

        let label = match node {
            Node::EmptyFile => name.green(),
            Node::TemplateFile => format!("{} (template)", name).bright_green(),
            Node::Directory(_) => name.blue(),
        };
        println!("{}{}{}", prefix.yellow(), connector, label);

        if let Node::Directory(children) = node {
            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };

            print_tree(children, &child_prefix);
        }
    }
}

/// Prints what [`crate::materialize::Materializer`] would create under `destination`.
pub fn preview_as_tree(structure: &Structure, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    println!("{}", destination.display().to_string().blue());

    print_tree(structure, "");
}
