//! End-to-end runs of the built-in features through the scaffold service.
//!
//! The recording runner stands in for the package manager; its effect writes
//! the files the Next.js generator would have produced.

use std::path::{Path, PathBuf};

use nxtgen_adapters::{LocalFilesystem, MemoryFilesystem, RecordingRunner, builtin_features};
use nxtgen_core::{
    application::{Filesystem, ScaffoldRequest, ScaffoldService},
    domain::{AuthProvider, ExampleSet, License, Orm, ProjectConfig, ProjectName, UiKit},
};

const LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "Create Next App",
};

export default function RootLayout({
  children,
}: Readonly<{
  children: React.ReactNode;
}>) {
  return (
    <html lang="en">
      <body className="antialiased">{children}</body>
    </html>
  );
}
"#;

const PACKAGE_JSON: &str = "{\n  \"name\": \"demo\",\n  \"scripts\": {\n    \"dev\": \"next dev\",\n    \"build\": \"next build\",\n    \"lint\": \"next lint\"\n  }\n}\n";

fn base_files() -> [(&'static str, &'static str); 6] {
    [
        ("src/app/layout.tsx", LAYOUT),
        ("src/app/page.tsx", "export default function Home() {}\n"),
        ("src/app/globals.css", "@import \"tailwindcss\";\n"),
        ("package.json", PACKAGE_JSON),
        ("public/next.svg", "<svg/>"),
        ("public/vercel.svg", "<svg/>"),
    ]
}

/// A runner whose generator call writes the base project through `fs`.
fn generating_runner<F>(fs: F) -> RecordingRunner
where
    F: Filesystem + Clone + 'static,
{
    RecordingRunner::new().with_effect(move |command, cwd| {
        if !command.to_string().contains("create-next-app") {
            return;
        }
        let root = cwd.join("demo");
        for (rel, content) in base_files() {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs.create_dir_all(parent).unwrap();
            }
            fs.write_file(&path, content).unwrap();
        }
    })
}

fn request(parent: impl Into<PathBuf>, config: ProjectConfig) -> ScaffoldRequest {
    ScaffoldRequest::new(ProjectName::parse("demo").unwrap(), parent, config)
}

fn read(fs: &MemoryFilesystem, rel: &str) -> String {
    fs.read_file(Path::new("/work/demo").join(rel))
        .unwrap_or_else(|| panic!("{rel} missing"))
}

fn full_stack() -> ProjectConfig {
    ProjectConfig {
        orm: Orm::Prisma,
        react_query: true,
        axios: true,
        ui: UiKit::HeroUi,
        auth: AuthProvider::Clerk,
        examples: ExampleSet::Both,
        vitest: true,
        husky: true,
        license: License::Mit,
        ..ProjectConfig::default()
    }
}

#[test]
fn full_stack_runs_generator_features_then_installs() {
    let fs = MemoryFilesystem::new();
    let runner = generating_runner(fs.clone());
    let service = ScaffoldService::new(
        Box::new(fs.clone()),
        Box::new(runner.clone()),
        builtin_features(),
    );

    let report = service.scaffold(&request("/work", full_stack())).unwrap();

    let calls = runner.calls();
    assert!(calls[0].0.starts_with("npx create-next-app@latest demo"));
    assert_eq!(calls[0].1, PathBuf::from("/work"));
    assert!(calls[1].0.starts_with("npm install @prisma/client"));
    assert!(calls[2].0.starts_with("npm install -D prisma"));
    assert_eq!(calls[3].0, "npx prisma generate");
    assert!(calls[1..].iter().all(|(_, cwd)| cwd == Path::new("/work/demo")));

    let layout = read(&fs, "src/app/layout.tsx");
    assert!(layout.contains("<ClerkProvider><Providers>{children}</Providers></ClerkProvider>"));

    let providers = read(&fs, "src/components/providers.tsx");
    assert!(providers.contains("<QueryProvider>"));
    assert!(providers.contains("<HeroUIProvider>"));
    assert!(!providers.contains("SessionProvider"));

    assert!(read(&fs, "src/app/globals.css").contains("@plugin './hero.ts';"));
    assert!(read(&fs, "src/app/api/posts/route.ts").contains("import prisma from '@/lib/prisma';"));
    assert!(read(&fs, "src/app/page.tsx").contains("href=\"/auth\""));
    assert!(fs.read_file("/work/demo/public/next.svg").is_none());
    assert!(fs.is_executable("/work/demo/.husky/pre-commit"));
    assert!(fs.list_files().iter().all(|p| p.starts_with("/work/demo")));

    let pkg: serde_json::Value = serde_json::from_str(&read(&fs, "package.json")).unwrap();
    let scripts: Vec<&str> = pkg["scripts"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(scripts, ["dev", "build", "lint", "test", "prepare"]);

    assert_eq!(report.features.first().map(String::as_str), Some("cleanup"));
    assert_eq!(report.features.last().map(String::as_str), Some("docs"));
    assert!(report.install.is_some());
}

#[test]
fn failed_dev_install_keeps_generated_files() {
    let fs = MemoryFilesystem::new();
    let runner = generating_runner(fs.clone()).fail_on("install -D");
    let service = ScaffoldService::new(
        Box::new(fs.clone()),
        Box::new(runner.clone()),
        builtin_features(),
    );

    let err = service.scaffold(&request("/work", full_stack())).unwrap_err();

    assert!(err.is_install_failure());
    let suggestions = err.suggestions();
    assert!(suggestions.iter().any(|s| s.starts_with("npm install -D ") && s.contains("prisma")));
    assert!(suggestions.iter().any(|s| s == "npx prisma generate"));
    assert!(fs.read_file("/work/demo/README.md").is_some());
    assert!(!runner.commands().iter().any(|c| c.contains("prisma generate")));
}

#[test]
fn failed_post_install_step_is_a_warning() {
    let fs = MemoryFilesystem::new();
    let runner = generating_runner(fs.clone()).fail_on("prisma generate");
    let service = ScaffoldService::new(Box::new(fs), Box::new(runner), builtin_features());

    let report = service.scaffold(&request("/work", full_stack())).unwrap();
    assert!(report.warnings.iter().any(|w| w.contains("npx prisma generate")));
}

#[test]
fn defaults_on_a_real_directory() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LocalFilesystem::new();
    let runner = generating_runner(fs.clone());
    let service = ScaffoldService::new(
        Box::new(fs),
        Box::new(runner.clone()),
        builtin_features(),
    );

    let mut req = request(dir.path(), ProjectConfig::default());
    req.options.skip_install = true;
    let report = service.scaffold(&req).unwrap();

    let root = dir.path().join("demo");
    let page = std::fs::read_to_string(root.join("src/app/page.tsx")).unwrap();
    assert!(page.contains("Welcome to demo"));
    assert!(root.join("README.md").exists());
    assert!(!root.join("public/vercel.svg").exists());
    assert!(!root.join("LICENSE").exists());

    assert_eq!(runner.commands().len(), 1);
    assert!(report.install.is_none());
    assert!(
        report
            .next_steps
            .iter()
            .any(|s| s.starts_with("npm install ") && s.contains("lucide-react"))
    );
    assert_eq!(report.next_steps.last().map(String::as_str), Some("npm run dev"));
}

#[test]
fn preview_lists_every_enabled_feature_in_order() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::new();
    let service = ScaffoldService::new(
        Box::new(fs.clone()),
        Box::new(runner.clone()),
        builtin_features(),
    );

    let preview = service.plan(&request("/work", full_stack())).unwrap();
    assert_eq!(
        preview.features,
        [
            "cleanup",
            "data-layer",
            "data-fetching",
            "ui-kit",
            "motion-icons",
            "auth",
            "testing",
            "quality",
            "devops",
            "examples",
            "providers",
            "docs",
        ]
    );
    assert!(preview.dependencies.iter().any(|d| d == "@clerk/nextjs"));
    assert_eq!(preview.post_install, ["npx prisma generate"]);
    assert!(fs.list_files().is_empty());
    assert!(runner.commands().is_empty());
}
