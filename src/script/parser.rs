//! Gradle build script parser
//!
//! Handles both DSLs with one grammar:
//! - build.gradle.kts (Kotlin DSL): `id("x") version "y"`, `implementation("g:a:v")`
//! - build.gradle (Groovy DSL): `id 'x' version 'y'`, `implementation 'g:a:v'`
//! - Platform declarations: `implementation(platform("g:a:v"))`
//! - Map notation dependencies: group: 'x', name: 'y', version: 'z'
//! - Java toolchain, repositories and the test task runner
//!
//! Anything else is rejected in strict mode and skipped in lenient mode.

use super::scanner::{scan, Item};
use crate::domain::{
    BuildScript, Coordinate, Dependency, Plugin, Repository, Scope, TestRunner, TestTask,
    Toolchain,
};
use crate::error::SchemaError;
use crate::validate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

// Regex patterns for statements

// Quoted string in either quote style: "x" or 'x'
static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:"([^"]*)"|'([^']*)')$"#).unwrap());

// Project property: version = "1.0.2", group 'org.example'
static PROPERTY_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(version|group)(?:\s*=\s*|\s+)(.+)$").unwrap());

// Plugin by id: id("x"), id("x") version("y"), id("x") version "y", id 'x' version 'y'
static PLUGIN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^id\s*\(?\s*["']([^"']*)["']\s*\)?(?:\s+version\s*\(?\s*["']([^"']*)["']\s*\)?)?$"#,
    )
    .unwrap()
});

// Kotlin plugin shorthand: kotlin("jvm") version "2.1.0"
static PLUGIN_KOTLIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^kotlin\s*\(\s*["']([^"']*)["']\s*\)(?:\s+version\s*\(?\s*["']([^"']*)["']\s*\)?)?$"#,
    )
    .unwrap()
});

// Kotlin accessor for core plugins: java, `java-library`
static PLUGIN_ACCESSOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`?([A-Za-z][A-Za-z0-9_-]*)`?$").unwrap());

// languageVersion.set(JavaLanguageVersion.of(17))
static TOOLCHAIN_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^languageVersion\s*\.\s*set\s*\(\s*JavaLanguageVersion\s*\.\s*of\s*\(\s*([^()]*?)\s*\)\s*\)$",
    )
    .unwrap()
});

// languageVersion = JavaLanguageVersion.of(17)
static TOOLCHAIN_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^languageVersion\s*=\s*JavaLanguageVersion\s*\.\s*of\s*\(\s*([^()]*?)\s*\)$")
        .unwrap()
});

// Repository shorthand: mavenCentral()
static REPO_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*\(\s*\)$").unwrap());

// Repository by url: maven("x"), maven(url = "x"), maven(uri("x"))
static REPO_MAVEN_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^maven\s*\(\s*(?:url\s*=\s*)?(?:uri\s*\(\s*)?["']([^"']*)["']\s*\)?\s*\)$"#)
        .unwrap()
});

// Inside maven { }: url = uri("x"), url = "x", url 'x'
static MAVEN_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^url\s*(?:=\s*)?(?:uri\s*\(\s*)?["']([^"']*)["']\s*\)?$"#).unwrap()
});

// Dependency declaration: configuration(args) or configuration args
static DEPENDENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*(?:\((.*)\)|\s+(.+))$").unwrap());

// platform("g:a:v")
static PLATFORM_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^platform\s*\(\s*(.*?)\s*\)$").unwrap());

// Map notation, Groovy (`:`) or Kotlin named arguments (`=`)
static MAP_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^group\s*[:=]\s*["']([^"']*)["']\s*,\s*name\s*[:=]\s*["']([^"']*)["'](?:\s*,\s*version\s*[:=]\s*["']([^"']*)["'])?$"#,
    )
    .unwrap()
});

// Test task by name: tasks.named<Test>("test"), tasks.named('test', Test)
static TEST_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^tasks\s*\.\s*named\s*(?:<\s*Test\s*>)?\s*\(\s*["']([^"']+)["']\s*(?:,\s*Test(?:::class(?:\.java)?)?\s*)?\)$"#,
    )
    .unwrap()
});

// Default test task: tasks.test, or Groovy's top-level test
static TEST_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:tasks\s*\.\s*)?test$").unwrap());

// Runner directive: useJUnitPlatform()
static RUNNER_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(use\w+)\s*\(\s*\)$").unwrap());

// Runner directive with options block: useJUnitPlatform { ... }
static RUNNER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(use\w+)\s*(?:\(\s*\))?$").unwrap());

/// Options controlling how unknown content is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject statements and blocks the schema does not describe
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ParseOptions {
    /// Options that skip unknown content instead of rejecting it
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// A statement or block ignored in lenient mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Line the skipped item starts on (1-based)
    pub line: usize,
    /// Statement text or block header
    pub text: String,
}

/// Result of parsing, with anything lenient mode skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    pub script: BuildScript,
    pub skipped: Vec<Skipped>,
}

/// Parse build script content in strict mode
pub fn parse(content: &str) -> Result<BuildScript, SchemaError> {
    parse_with(content, &ParseOptions::default()).map(|parsed| parsed.script)
}

/// Parse build script content with the given options
pub fn parse_with(content: &str, options: &ParseOptions) -> Result<ParsedScript, SchemaError> {
    let items = scan(content)?;
    let mut parser = Parser::new(options);

    for item in items {
        let line = item.line();
        parser.item(item).map_err(|e| e.at(line))?;
    }

    parser.finish()
}

/// Block the parser is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    Plugins,
    Java,
    Toolchain,
    Repositories,
    MavenRepository,
    Dependencies,
    TestTask,
    Skipped,
}

impl Context {
    fn name(self) -> &'static str {
        match self {
            Context::Root => "top level",
            Context::Plugins => "plugins",
            Context::Java => "java",
            Context::Toolchain => "java.toolchain",
            Context::Repositories => "repositories",
            Context::MavenRepository => "maven repository",
            Context::Dependencies => "dependencies",
            Context::TestTask => "test task",
            Context::Skipped => "skipped block",
        }
    }
}

/// An open block and whatever it accumulates until it closes
#[derive(Debug)]
enum Frame {
    Plain(Context),
    MavenRepository {
        url: Option<String>,
    },
    TestTask {
        name: String,
        runner: Option<TestRunner>,
    },
}

impl Frame {
    fn context(&self) -> Context {
        match self {
            Frame::Plain(context) => *context,
            Frame::MavenRepository { .. } => Context::MavenRepository,
            Frame::TestTask { .. } => Context::TestTask,
        }
    }
}

/// Fields collected so far
#[derive(Debug, Default)]
struct Draft {
    plugins: Vec<Plugin>,
    version: Option<String>,
    group: Option<String>,
    toolchain: Option<Toolchain>,
    repositories: Vec<Repository>,
    dependencies: Vec<Dependency>,
    test: Option<TestTask>,
}

struct Parser<'a> {
    options: &'a ParseOptions,
    frames: Vec<Frame>,
    draft: Draft,
    skipped: Vec<Skipped>,
}

impl<'a> Parser<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            frames: vec![Frame::Plain(Context::Root)],
            draft: Draft::default(),
            skipped: Vec::new(),
        }
    }

    fn context(&self) -> Context {
        self.frames
            .last()
            .map(Frame::context)
            .unwrap_or(Context::Root)
    }

    fn item(&mut self, item: Item) -> Result<(), SchemaError> {
        match item {
            Item::Open { header, line } => self.open(&header, line),
            Item::Close { .. } => self.close(),
            Item::Statement { text, line } => self.statement(&text, line),
        }
    }

    fn open(&mut self, header: &str, line: usize) -> Result<(), SchemaError> {
        let context = self.context();
        let frame = match (context, header) {
            (Context::Skipped, _) => Frame::Plain(Context::Skipped),
            (Context::Root, "plugins") => Frame::Plain(Context::Plugins),
            (Context::Root, "java") => Frame::Plain(Context::Java),
            (Context::Root, "repositories") => Frame::Plain(Context::Repositories),
            (Context::Root, "dependencies") => Frame::Plain(Context::Dependencies),
            (Context::Root, _) if test_task_name(header).is_some() => Frame::TestTask {
                name: test_task_name(header).unwrap_or_default(),
                runner: None,
            },
            (Context::Dependencies, _) if DEPENDENCY.is_match(header) => {
                // The declaration is kept; its configuration closure is not part of the schema
                self.dependency_statement(header)?;
                self.unrecognized_block(header, context, line)?
            }
            (Context::Java, "toolchain") => Frame::Plain(Context::Toolchain),
            (Context::Repositories, "maven") => Frame::MavenRepository { url: None },
            (Context::TestTask, _) if RUNNER_BLOCK.is_match(header) => {
                // Runner options (includeTags, ...) are not part of the schema
                let name = RUNNER_BLOCK
                    .captures(header)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                self.set_runner(name)?;
                Frame::Plain(Context::Skipped)
            }
            _ => self.unrecognized_block(header, context, line)?,
        };

        debug!(line, block = header, "entering block");
        self.frames.push(frame);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SchemaError> {
        if self.frames.len() <= 1 {
            return Err(SchemaError::UnbalancedBraces);
        }

        match self.frames.pop() {
            Some(Frame::MavenRepository { url }) => {
                let url = url.ok_or_else(|| SchemaError::missing_field("repositories.maven.url"))?;
                let repository = Repository::Maven { url };
                validate::validate_repository(&repository)?;
                self.draft.repositories.push(repository);
            }
            Some(Frame::TestTask { name, runner }) => {
                let runner = runner.ok_or_else(|| SchemaError::missing_field("test.runner"))?;
                let task = TestTask::new(name, runner);
                validate::validate_test_task(&task)?;
                if self.draft.test.is_some() {
                    return Err(SchemaError::duplicate_field("test"));
                }
                self.draft.test = Some(task);
            }
            Some(Frame::Plain(_)) | None => {}
        }
        Ok(())
    }

    fn statement(&mut self, text: &str, line: usize) -> Result<(), SchemaError> {
        let context = self.context();
        let recognized = match context {
            Context::Root => self.root_statement(text)?,
            Context::Plugins => self.plugin_statement(text)?,
            Context::Java => match text.strip_prefix("toolchain.") {
                Some(rest) => self.toolchain_statement(rest)?,
                None => false,
            },
            Context::Toolchain => self.toolchain_statement(text)?,
            Context::Repositories => self.repository_statement(text)?,
            Context::MavenRepository => self.maven_url_statement(text)?,
            Context::Dependencies => self.dependency_statement(text)?,
            Context::TestTask => self.runner_statement(text)?,
            Context::Skipped => true,
        };

        if recognized {
            debug!(line, statement = text, context = context.name(), "parsed statement");
            Ok(())
        } else {
            self.unrecognized_statement(text, context, line)
        }
    }

    fn root_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        if let Some(caps) = PROPERTY_ASSIGN.captures(text) {
            let field = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let raw = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

            let value = unquote(raw).ok_or_else(|| {
                SchemaError::invalid_field(
                    field,
                    format!("expected a quoted string, found '{}'", raw),
                )
            })?;
            validate::check_literal(field, value)?;

            let slot = if field == "version" {
                &mut self.draft.version
            } else {
                &mut self.draft.group
            };
            if slot.is_some() {
                return Err(SchemaError::duplicate_field(field));
            }
            *slot = Some(value.to_string());
            return Ok(true);
        }

        if let Some(rest) = text.strip_prefix("java.toolchain.") {
            return self.toolchain_statement(rest);
        }

        Ok(false)
    }

    fn plugin_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        let plugin = if let Some(caps) = PLUGIN_ID.captures(text) {
            Plugin {
                id: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
                version: caps.get(2).map(|m| m.as_str().to_string()),
            }
        } else if let Some(caps) = PLUGIN_KOTLIN.captures(text) {
            let module = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            Plugin {
                id: format!("org.jetbrains.kotlin.{}", module),
                version: caps.get(2).map(|m| m.as_str().to_string()),
            }
        } else if let Some(caps) = PLUGIN_ACCESSOR.captures(text) {
            let plugin = Plugin::new(caps.get(1).map(|m| m.as_str()).unwrap_or_default());
            if !plugin.is_core() {
                return Ok(false);
            }
            plugin
        } else {
            return Ok(false);
        };

        validate::validate_plugin(&plugin)?;
        self.draft.plugins.push(plugin);
        Ok(true)
    }

    fn toolchain_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        let raw = TOOLCHAIN_SET
            .captures(text)
            .or_else(|| TOOLCHAIN_ASSIGN.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(false),
        };

        let toolchain = parse_toolchain(raw)?;
        if self.draft.toolchain.is_some() {
            return Err(SchemaError::duplicate_field("toolchain"));
        }
        self.draft.toolchain = Some(toolchain);
        Ok(true)
    }

    fn repository_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        let repository = if let Some(caps) = REPO_MAVEN_CALL.captures(text) {
            Repository::Maven {
                url: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
            }
        } else if let Some(caps) = REPO_SHORTHAND.captures(text) {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            Repository::from_shorthand(name).ok_or_else(|| SchemaError::UnknownRepository {
                name: name.to_string(),
            })?
        } else {
            return Ok(false);
        };

        validate::validate_repository(&repository)?;
        self.draft.repositories.push(repository);
        Ok(true)
    }

    fn maven_url_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        let value = match MAVEN_URL.captures(text).and_then(|caps| caps.get(1)) {
            Some(m) => m.as_str().to_string(),
            None => return Ok(false),
        };

        if let Some(Frame::MavenRepository { url }) = self.frames.last_mut() {
            if url.is_some() {
                return Err(SchemaError::duplicate_field("repositories.maven.url"));
            }
            *url = Some(value);
        }
        Ok(true)
    }

    fn dependency_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        let caps = match DEPENDENCY.captures(text) {
            Some(caps) => caps,
            None => return Ok(false),
        };

        let token = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let args = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        let scope = Scope::from_configuration(token).ok_or_else(|| SchemaError::unknown_scope(token))?;
        let dependency = parse_dependency_notation(args, scope)?;
        self.draft.dependencies.push(dependency);
        Ok(true)
    }

    fn runner_statement(&mut self, text: &str) -> Result<bool, SchemaError> {
        match RUNNER_CALL.captures(text).and_then(|caps| caps.get(1)) {
            Some(m) => {
                self.set_runner(m.as_str())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_runner(&mut self, directive: &str) -> Result<(), SchemaError> {
        let selected =
            TestRunner::from_directive(directive).ok_or_else(|| SchemaError::UnknownTestRunner {
                name: directive.to_string(),
            })?;

        if let Some(Frame::TestTask { runner, .. }) = self.frames.last_mut() {
            if runner.is_some() {
                return Err(SchemaError::duplicate_field("test.runner"));
            }
            *runner = Some(selected);
        }
        Ok(())
    }

    fn unrecognized_block(
        &mut self,
        header: &str,
        context: Context,
        line: usize,
    ) -> Result<Frame, SchemaError> {
        if self.options.strict {
            return Err(SchemaError::UnrecognizedBlock {
                block: header.to_string(),
                context: context.name().to_string(),
            });
        }
        warn!(line, block = header, context = context.name(), "skipping unrecognized block");
        self.skipped.push(Skipped {
            line,
            text: format!("{} {{ ... }}", header),
        });
        Ok(Frame::Plain(Context::Skipped))
    }

    fn unrecognized_statement(
        &mut self,
        text: &str,
        context: Context,
        line: usize,
    ) -> Result<(), SchemaError> {
        if self.options.strict {
            return Err(SchemaError::UnrecognizedStatement {
                statement: text.to_string(),
                context: context.name().to_string(),
            });
        }
        warn!(line, statement = text, context = context.name(), "skipping unrecognized statement");
        self.skipped.push(Skipped {
            line,
            text: text.to_string(),
        });
        Ok(())
    }

    fn finish(self) -> Result<ParsedScript, SchemaError> {
        let draft = self.draft;
        let script = BuildScript {
            plugins: draft.plugins,
            version: draft
                .version
                .ok_or_else(|| SchemaError::missing_field("version"))?,
            group: draft.group.ok_or_else(|| SchemaError::missing_field("group"))?,
            toolchain: draft
                .toolchain
                .ok_or_else(|| SchemaError::missing_field("toolchain"))?,
            repositories: draft.repositories,
            dependencies: draft.dependencies,
            test: draft.test,
        };

        validate::validate(&script)?;
        Ok(ParsedScript {
            script,
            skipped: self.skipped,
        })
    }
}

/// Strip matching quotes from a string literal
fn unquote(raw: &str) -> Option<&str> {
    let caps = STRING_LITERAL.captures(raw)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn test_task_name(header: &str) -> Option<String> {
    if let Some(caps) = TEST_NAMED.captures(header) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    if TEST_SHORTHAND.is_match(header) {
        return Some("test".to_string());
    }
    None
}

fn parse_toolchain(raw: &str) -> Result<Toolchain, SchemaError> {
    let version: i64 = raw.parse().map_err(|_| {
        SchemaError::invalid_field(
            "toolchain",
            format!("expected a positive integer, found '{}'", raw),
        )
    })?;
    if version <= 0 {
        return Err(SchemaError::invalid_field(
            "toolchain",
            format!("language version must be a positive integer, found {}", version),
        ));
    }
    let version = u32::try_from(version).map_err(|_| {
        SchemaError::invalid_field(
            "toolchain",
            format!("language version {} is out of range", version),
        )
    })?;
    Ok(Toolchain::new(version))
}

fn parse_dependency_notation(args: &str, scope: Scope) -> Result<Dependency, SchemaError> {
    if let Some(value) = unquote(args) {
        return Ok(Dependency::library(value.parse()?, scope));
    }

    if let Some(inner) = PLATFORM_ARG.captures(args).and_then(|caps| caps.get(1)) {
        if let Some(value) = unquote(inner.as_str()) {
            return Ok(Dependency::platform(value.parse()?, scope));
        }
    }

    if let Some(caps) = MAP_NOTATION.captures(args) {
        let coordinate = Coordinate::new(
            caps.get(1).map(|m| m.as_str()).unwrap_or_default(),
            caps.get(2).map(|m| m.as_str()).unwrap_or_default(),
            caps.get(3).map(|m| m.as_str().to_string()),
        );
        coordinate.validate()?;
        return Ok(Dependency::library(coordinate, scope));
    }

    Err(SchemaError::invalid_field(
        "dependencies",
        format!("unsupported dependency notation '{}'", args),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyKind;

    const SPRING_BOOT_KTS: &str = r#"plugins {
    id("org.springframework.boot") version("3.4.3")
    id("java")
}

version = "1.0.2"
group = "org.gradle.samples"

java {
    toolchain {
        languageVersion.set(JavaLanguageVersion.of(17))
    }
}

repositories {
    mavenCentral()
}

dependencies {
    implementation(platform("org.springframework.boot:spring-boot-dependencies:3.4.3"))

    implementation("org.springframework.boot:spring-boot-starter")

    testImplementation("org.springframework.boot:spring-boot-starter-test")

    testRuntimeOnly("org.junit.platform:junit-platform-launcher")
}

tasks.named<Test>("test") {
    useJUnitPlatform()
}
"#;

    fn with_required(body: &str) -> String {
        format!(
            "version = \"1.0\"\ngroup = \"org.example\"\njava.toolchain.languageVersion.set(JavaLanguageVersion.of(21))\n{}",
            body
        )
    }

    #[test]
    fn test_parse_spring_boot_sample() {
        let script = parse(SPRING_BOOT_KTS).unwrap();
        assert_eq!(script.group, "org.gradle.samples");
        assert_eq!(script.version, "1.0.2");
        assert_eq!(script.toolchain.language_version, 17);
        assert_eq!(script.repositories, vec![Repository::MavenCentral]);

        assert_eq!(
            script.plugins,
            vec![
                Plugin::new("org.springframework.boot").with_version("3.4.3"),
                Plugin::new("java"),
            ]
        );

        let compile: Vec<_> = script.dependencies_in(Scope::Compile).collect();
        assert_eq!(compile.len(), 1);
        assert_eq!(compile[0].coordinate.artifact, "spring-boot-starter");

        let test_compile: Vec<_> = script.dependencies_in(Scope::TestCompile).collect();
        assert_eq!(test_compile.len(), 1);
        assert_eq!(test_compile[0].coordinate.artifact, "spring-boot-starter-test");

        let test_runtime: Vec<_> = script.dependencies_in(Scope::TestRuntime).collect();
        assert_eq!(test_runtime.len(), 1);
        assert_eq!(test_runtime[0].coordinate.artifact, "junit-platform-launcher");

        let platforms: Vec<_> = script.platforms().collect();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].coordinate.version.as_deref(), Some("3.4.3"));

        assert_eq!(
            script.test,
            Some(TestTask::new("test", TestRunner::JunitPlatform))
        );
    }

    #[test]
    fn test_parse_groovy_equivalent() {
        let content = r#"
plugins {
    id 'org.springframework.boot' version '3.4.3'
    id 'java'
}

version = '1.0.2'
group = 'org.gradle.samples'

java {
    toolchain {
        languageVersion = JavaLanguageVersion.of(17)
    }
}

repositories {
    mavenCentral()
}

dependencies {
    implementation platform('org.springframework.boot:spring-boot-dependencies:3.4.3')
    implementation 'org.springframework.boot:spring-boot-starter'
    testImplementation 'org.springframework.boot:spring-boot-starter-test'
    testRuntimeOnly 'org.junit.platform:junit-platform-launcher'
}

tasks.named('test') {
    useJUnitPlatform()
}
"#;
        assert_eq!(parse(content).unwrap(), parse(SPRING_BOOT_KTS).unwrap());
    }

    #[test]
    fn test_parse_empty_version_names_field() {
        let content = SPRING_BOOT_KTS.replace("version = \"1.0.2\"", "version = \"\"");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.field(), Some("version"));
        assert_eq!(err.line(), Some(6));
    }

    #[test]
    fn test_parse_unquoted_group() {
        let content = SPRING_BOOT_KTS.replace("group = \"org.gradle.samples\"", "group = samples");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.field(), Some("group"));
        assert!(format!("{}", err).contains("expected a quoted string"));
    }

    #[test]
    fn test_parse_unknown_scope_rejected() {
        let content = SPRING_BOOT_KTS.replace(
            "testRuntimeOnly(\"org.junit.platform",
            "compileOnly(\"org.junit.platform",
        );
        let err = parse(&content).unwrap_err();
        assert_eq!(
            err.kind(),
            &SchemaError::UnknownScope {
                token: "compileOnly".to_string()
            }
        );
        assert_eq!(err.line(), Some(26));
    }

    #[test]
    fn test_parse_unknown_scope_rejected_in_lenient_mode() {
        let content = with_required("dependencies {\n    api 'com.google.guava:guava:33.0.0-jre'\n}\n");
        let err = parse_with(&content, &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err.kind(), SchemaError::UnknownScope { .. }));
    }

    #[test]
    fn test_parse_unknown_scope_with_closure_rejected() {
        let content = with_required(
            "dependencies {\n    api(\"com.google.guava:guava:33.0.0-jre\") {\n        because(\"x\")\n    }\n}\n",
        );
        for options in [ParseOptions::default(), ParseOptions::lenient()] {
            let err = parse_with(&content, &options).unwrap_err();
            assert_eq!(
                err.kind(),
                &SchemaError::UnknownScope {
                    token: "api".to_string()
                }
            );
            assert_eq!(err.line(), Some(5));
        }
    }

    #[test]
    fn test_parse_dependency_closure_lenient_keeps_dependency() {
        let content = with_required(
            "dependencies {\n    implementation(\"com.google.guava:guava:33.0.0-jre\") {\n        exclude(group = \"com.google.code.findbugs\")\n    }\n}\n",
        );
        let parsed = parse_with(&content, &ParseOptions::lenient()).unwrap();

        assert_eq!(parsed.script.dependencies.len(), 1);
        let dependency = &parsed.script.dependencies[0];
        assert_eq!(dependency.scope, Scope::Compile);
        assert_eq!(dependency.coordinate.to_string(), "com.google.guava:guava:33.0.0-jre");

        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 5);
        assert!(parsed.skipped[0].text.starts_with("implementation("));
    }

    #[test]
    fn test_parse_dependency_closure_strict_rejected() {
        let content = with_required(
            "dependencies {\n    implementation 'com.google.guava:guava:33.0.0-jre' {\n        transitive = false\n    }\n}\n",
        );
        let err = parse(&content).unwrap_err();
        assert!(matches!(
            err.kind(),
            SchemaError::UnrecognizedBlock { context, .. } if context == "dependencies"
        ));
    }

    #[test]
    fn test_parse_missing_required_fields() {
        let err = parse("group = \"g\"\njava { toolchain { languageVersion = JavaLanguageVersion.of(17) } }").unwrap_err();
        assert_eq!(err, SchemaError::missing_field("version"));

        let err = parse("version = \"1\"\njava { toolchain { languageVersion = JavaLanguageVersion.of(17) } }").unwrap_err();
        assert_eq!(err, SchemaError::missing_field("group"));

        let err = parse("version = \"1\"\ngroup = \"g\"").unwrap_err();
        assert_eq!(err, SchemaError::missing_field("toolchain"));
    }

    #[test]
    fn test_parse_duplicate_version() {
        let content = with_required("version = \"2.0\"\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.kind(), &SchemaError::duplicate_field("version"));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_parse_toolchain_rejects_non_positive() {
        for value in ["0", "-1", "\"17\"", "seventeen", "99999999999"] {
            let content = format!(
                "version = \"1\"\ngroup = \"g\"\njava {{ toolchain {{ languageVersion.set(JavaLanguageVersion.of({})) }} }}",
                value
            );
            let err = parse(&content).unwrap_err();
            assert_eq!(err.field(), Some("toolchain"), "value {}", value);
        }
    }

    #[test]
    fn test_parse_invalid_coordinate() {
        let content = with_required("dependencies {\n    implementation(\"junit\")\n}\n");
        let err = parse(&content).unwrap_err();
        assert!(matches!(err.kind(), SchemaError::InvalidCoordinate { .. }));
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_parse_map_notation() {
        let content = with_required(
            "dependencies {\n    implementation group: 'org.apache.wicket', name: 'wicket-core', version: '9.12.0'\n    testImplementation(group = \"junit\", name = \"junit\")\n}\n",
        );
        let script = parse(&content).unwrap();
        assert_eq!(script.dependencies.len(), 2);
        assert_eq!(
            script.dependencies[0].coordinate.to_string(),
            "org.apache.wicket:wicket-core:9.12.0"
        );
        assert_eq!(script.dependencies[1].coordinate.to_string(), "junit:junit");
        assert_eq!(script.dependencies[1].scope, Scope::TestCompile);
    }

    #[test]
    fn test_parse_unsupported_notation() {
        let content = with_required("dependencies {\n    implementation(libs.spring.boot)\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.field(), Some("dependencies"));
        assert!(format!("{}", err).contains("unsupported dependency notation"));
    }

    #[test]
    fn test_parse_platform_kind() {
        let content = with_required(
            "dependencies { testImplementation(platform(\"org.junit:junit-bom:5.11.4\")) }",
        );
        let script = parse(&content).unwrap();
        assert_eq!(script.dependencies[0].kind, DependencyKind::Platform);
        assert_eq!(script.dependencies[0].scope, Scope::TestCompile);
    }

    #[test]
    fn test_parse_repositories() {
        let content = with_required(
            r#"repositories {
    mavenCentral()
    google()
    maven("https://repo.spring.io/milestone")
    maven { url = uri("https://jitpack.io") }
    maven {
        url 'https://repo.example.com/maven2'
    }
}
"#,
        );
        let script = parse(&content).unwrap();
        assert_eq!(
            script.repositories,
            vec![
                Repository::MavenCentral,
                Repository::Google,
                Repository::Maven {
                    url: "https://repo.spring.io/milestone".to_string()
                },
                Repository::Maven {
                    url: "https://jitpack.io".to_string()
                },
                Repository::Maven {
                    url: "https://repo.example.com/maven2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_unknown_repository() {
        let content = with_required("repositories {\n    jcenter()\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(
            err.kind(),
            &SchemaError::UnknownRepository {
                name: "jcenter".to_string()
            }
        );
    }

    #[test]
    fn test_parse_maven_block_without_url() {
        let content = with_required("repositories {\n    maven {\n    }\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.field(), Some("repositories.maven.url"));
    }

    #[test]
    fn test_parse_plugin_forms() {
        let content = with_required(
            r#"plugins {
    java
    `java-library`
    kotlin("jvm") version "2.1.0"
    id("io.spring.dependency-management") version "1.1.7"
}
"#,
        );
        let script = parse(&content).unwrap();
        let ids: Vec<_> = script.plugins.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "java",
                "java-library",
                "org.jetbrains.kotlin.jvm",
                "io.spring.dependency-management"
            ]
        );
        assert_eq!(script.plugins[2].version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn test_parse_bare_non_core_plugin_is_unrecognized() {
        let content = with_required("plugins {\n    springBoot\n}\n");
        let err = parse(&content).unwrap_err();
        assert!(matches!(
            err.kind(),
            SchemaError::UnrecognizedStatement { .. }
        ));
    }

    #[test]
    fn test_parse_test_task_forms() {
        for header in [
            "tasks.named<Test>(\"test\")",
            "tasks.named('test')",
            "tasks.named('test', Test)",
            "tasks.test",
            "test",
        ] {
            let content = with_required(&format!("{} {{\n    useJUnit()\n}}\n", header));
            let script = parse(&content).unwrap();
            assert_eq!(
                script.test,
                Some(TestTask::new("test", TestRunner::Junit)),
                "header {}",
                header
            );
        }
    }

    #[test]
    fn test_parse_custom_test_task_name() {
        let content = with_required("tasks.named<Test>(\"integrationTest\") { useTestNG() }");
        let script = parse(&content).unwrap();
        assert_eq!(
            script.test,
            Some(TestTask::new("integrationTest", TestRunner::Testng))
        );
    }

    #[test]
    fn test_parse_runner_with_options_block() {
        let content = with_required(
            "tasks.test {\n    useJUnitPlatform {\n        includeTags(\"fast\")\n    }\n}\n",
        );
        let script = parse(&content).unwrap();
        assert_eq!(script.test.map(|t| t.runner), Some(TestRunner::JunitPlatform));
    }

    #[test]
    fn test_parse_unknown_runner() {
        let content = with_required("tasks.test {\n    useSpock()\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(
            err.kind(),
            &SchemaError::UnknownTestRunner {
                name: "useSpock".to_string()
            }
        );
        assert_eq!(err.field(), Some("test.runner"));
    }

    #[test]
    fn test_parse_test_task_without_runner() {
        let content = with_required("tasks.test {\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(err.kind(), &SchemaError::missing_field("test.runner"));
    }

    #[test]
    fn test_parse_strict_rejects_unknown_content() {
        let content = with_required("description = \"demo\"\n");
        let err = parse(&content).unwrap_err();
        assert!(matches!(
            err.kind(),
            SchemaError::UnrecognizedStatement { .. }
        ));

        let content = with_required("springBoot {\n    mainClass.set(\"demo.App\")\n}\n");
        let err = parse(&content).unwrap_err();
        assert_eq!(
            err.kind(),
            &SchemaError::UnrecognizedBlock {
                block: "springBoot".to_string(),
                context: "top level".to_string()
            }
        );
    }

    #[test]
    fn test_parse_lenient_skips_unknown_content() {
        let content = with_required(
            "description = \"demo\"\nspringBoot {\n    mainClass.set(\"demo.App\")\n    buildInfo { }\n}\n",
        );
        let parsed = parse_with(&content, &ParseOptions::lenient()).unwrap();
        assert_eq!(parsed.script.version, "1.0");
        assert_eq!(
            parsed.skipped,
            vec![
                Skipped {
                    line: 4,
                    text: "description = \"demo\"".to_string()
                },
                Skipped {
                    line: 5,
                    text: "springBoot { ... }".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_scanner_errors_surface() {
        let err = parse("plugins {\n").unwrap_err();
        assert_eq!(err.kind(), &SchemaError::UnbalancedBraces);
        let err = parse("version = '1.0\n").unwrap_err();
        assert_eq!(err.kind(), &SchemaError::UnterminatedString);
        let err = parse(&with_required("/* never closed\nfoo bar baz\n")).unwrap_err();
        assert_eq!(err.kind(), &SchemaError::UnterminatedComment);
        assert_eq!(err.line(), Some(4));
    }
}
