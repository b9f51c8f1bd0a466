//! Build script for minifying the embedded preview shell assets.
//!
//! `preview.js` is minified with oxc and `shell.css` is minified with
//! lightningcss and inlined into `shell.html`, so the binary embeds two
//! ready-to-serve assets. Placeholders (`__SANDPAD_*__`) survive both
//! minifiers and are substituted at request time.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::fs;
use std::path::Path;

const PREVIEW_JS: &str = "src/embed/serve/preview.js";
const SHELL_HTML: &str = "src/embed/serve/shell.html";
const SHELL_CSS: &str = "src/embed/serve/shell.css";

const SHELL_CSS_PLACEHOLDER: &str = "__SANDPAD_SHELL_CSS__";

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let out = Path::new(&out_dir);

    let js = fs::read_to_string(PREVIEW_JS).expect("Failed to read preview.js");
    fs::write(out.join("preview.min.js"), minify_js(&js)).expect("Failed to write minified JS");

    write_shell_page(out);

    for asset in [PREVIEW_JS, SHELL_HTML, SHELL_CSS] {
        println!("cargo:rerun-if-changed={asset}");
    }
}

/// Minify shell.css and inline it into shell.html's placeholder.
fn write_shell_page(out: &Path) {
    let html = fs::read_to_string(SHELL_HTML).expect("Failed to read shell.html");
    let css = minify_css(&fs::read_to_string(SHELL_CSS).expect("Failed to read shell.css"));

    assert_eq!(
        html.matches(SHELL_CSS_PLACEHOLDER).count(),
        1,
        "shell.html must contain exactly one {SHELL_CSS_PLACEHOLDER} placeholder"
    );

    let page = html.replace(SHELL_CSS_PLACEHOLDER, &css);
    fs::write(out.join("shell.html"), page).expect("Failed to write shell.html");
}

fn minify_js(source: &str) -> String {
    let allocator = Allocator::default();

    let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
    assert!(
        parsed.errors.is_empty(),
        "preview.js has parse errors: {:?}",
        parsed.errors
    );

    let mut program = parsed.program;
    let minified = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    })
    .minify(&allocator, &mut program);

    Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(minified.scoping)
        .build(&program)
        .code
}

fn minify_css(source: &str) -> String {
    let sheet = StyleSheet::parse(source, ParserOptions::default()).expect("Failed to parse CSS");
    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .expect("Failed to minify CSS");
    printed.code
}
