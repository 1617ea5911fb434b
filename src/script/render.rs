//! Canonical build script rendering
//!
//! Sections are written in a fixed order and empty sections are omitted:
//! plugins, project metadata, java toolchain, repositories, dependencies, test task.

use crate::domain::{BuildScript, Dependency, Dialect, Plugin, Repository, TestTask};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render a build script in the given dialect
pub fn render(script: &BuildScript, dialect: Dialect) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !script.plugins.is_empty() {
        let lines = script
            .plugins
            .iter()
            .map(|plugin| render_plugin(plugin, dialect))
            .collect::<Vec<_>>();
        sections.push(block("plugins", &lines));
    }

    sections.push(format!(
        "version = {}\ngroup = {}\n",
        quoted(&script.version, dialect),
        quoted(&script.group, dialect)
    ));

    let language_version = match dialect {
        Dialect::Kotlin => format!(
            "languageVersion.set(JavaLanguageVersion.of({}))",
            script.toolchain.language_version
        ),
        Dialect::Groovy => format!(
            "languageVersion = JavaLanguageVersion.of({})",
            script.toolchain.language_version
        ),
    };
    sections.push(block("java", &[block("toolchain", &[language_version])]));

    if !script.repositories.is_empty() {
        let lines = script
            .repositories
            .iter()
            .map(|repository| render_repository(repository, dialect))
            .collect::<Vec<_>>();
        sections.push(block("repositories", &lines));
    }

    if !script.dependencies.is_empty() {
        let lines = script
            .dependencies
            .iter()
            .map(|dependency| render_dependency(dependency, dialect))
            .collect::<Vec<_>>();
        sections.push(block("dependencies", &lines));
    }

    if let Some(task) = &script.test {
        sections.push(render_test_task(task, dialect));
    }

    sections.join("\n")
}

fn quoted(value: &str, dialect: Dialect) -> String {
    let q = dialect.quote();
    format!("{}{}{}", q, value, q)
}

/// Render a block; multi-line entries are indented line by line
fn block(header: &str, entries: &[String]) -> String {
    let mut out = format!("{} {{\n", header);
    for entry in entries {
        for line in entry.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "{}{}", INDENT, line);
            }
        }
    }
    out.push_str("}\n");
    out
}

fn render_plugin(plugin: &Plugin, dialect: Dialect) -> String {
    let id = quoted(&plugin.id, dialect);
    match (dialect, &plugin.version) {
        (Dialect::Kotlin, Some(version)) => {
            format!("id({}) version {}", id, quoted(version, dialect))
        }
        (Dialect::Kotlin, None) => format!("id({})", id),
        (Dialect::Groovy, Some(version)) => {
            format!("id {} version {}", id, quoted(version, dialect))
        }
        (Dialect::Groovy, None) => format!("id {}", id),
    }
}

fn render_repository(repository: &Repository, dialect: Dialect) -> String {
    match (repository, dialect) {
        (Repository::Maven { url }, Dialect::Kotlin) => {
            format!("maven {{ url = uri({}) }}", quoted(url, dialect))
        }
        (Repository::Maven { url }, Dialect::Groovy) => {
            format!("maven {{ url {} }}", quoted(url, dialect))
        }
        (other, _) => format!("{}()", other.shorthand()),
    }
}

fn render_dependency(dependency: &Dependency, dialect: Dialect) -> String {
    let configuration = dependency.scope.configuration();
    let coordinate = quoted(&dependency.coordinate.to_string(), dialect);
    match (dialect, dependency.is_platform()) {
        (Dialect::Kotlin, false) => format!("{}({})", configuration, coordinate),
        (Dialect::Kotlin, true) => format!("{}(platform({}))", configuration, coordinate),
        (Dialect::Groovy, false) => format!("{} {}", configuration, coordinate),
        (Dialect::Groovy, true) => format!("{} platform({})", configuration, coordinate),
    }
}

fn render_test_task(task: &TestTask, dialect: Dialect) -> String {
    let header = match dialect {
        Dialect::Kotlin => format!("tasks.named<Test>({})", quoted(&task.name, dialect)),
        Dialect::Groovy => format!("tasks.named({})", quoted(&task.name, dialect)),
    };
    block(&header, &[format!("{}()", task.runner.directive())])
}
