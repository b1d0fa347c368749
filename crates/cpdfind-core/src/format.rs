//! Source format detection by file extension.
//!
//! A format identifier names how a file's content is tokenized downstream
//! (`"javascript"`, `"python"`, ...). Detection is a pure lookup on the
//! extension after the last dot of the file name.

use std::path::Path;

use indexmap::IndexMap;

/// Built-in formats and the extensions that map to them.
const FORMATS: &[(&str, &[&str])] = &[
    ("apex", &["cls", "trigger"]),
    ("arduino", &["ino"]),
    ("bash", &["sh", "bash", "zsh"]),
    ("c", &["c", "h"]),
    ("clojure", &["clj", "cljs", "cljc", "edn"]),
    ("coffeescript", &["coffee"]),
    ("cpp", &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"]),
    ("csharp", &["cs"]),
    ("css", &["css"]),
    ("d", &["d"]),
    ("dart", &["dart"]),
    ("elixir", &["ex", "exs"]),
    ("elm", &["elm"]),
    ("erlang", &["erl", "hrl"]),
    ("fortran", &["f", "for", "f77", "f90"]),
    ("fsharp", &["fs", "fsi", "fsx"]),
    ("go", &["go"]),
    ("groovy", &["groovy", "gradle"]),
    ("haml", &["haml"]),
    ("haskell", &["hs", "lhs"]),
    ("haxe", &["hx"]),
    ("java", &["java"]),
    ("javascript", &["js", "es", "es6", "mjs", "cjs"]),
    ("json", &["json"]),
    ("jsx", &["jsx"]),
    ("julia", &["jl"]),
    ("kotlin", &["kt", "kts"]),
    ("less", &["less"]),
    ("lua", &["lua"]),
    ("markdown", &["md", "markdown", "mkd"]),
    ("markup", &["html", "htm", "xml", "xsl", "xslt", "svg", "vue"]),
    ("nim", &["nim"]),
    ("objectivec", &["m", "mm"]),
    ("ocaml", &["ml", "mli"]),
    ("pascal", &["pas", "p"]),
    ("perl", &["pl", "pm"]),
    ("php", &["php", "phtml"]),
    ("powershell", &["ps1", "psm1"]),
    ("protobuf", &["proto"]),
    ("python", &["py", "pyi", "pyw"]),
    ("r", &["r", "R"]),
    ("ruby", &["rb", "rake", "gemspec"]),
    ("rust", &["rs"]),
    ("sass", &["sass"]),
    ("scala", &["scala", "sc"]),
    ("scss", &["scss"]),
    ("solidity", &["sol"]),
    ("sql", &["sql"]),
    ("stylus", &["styl"]),
    ("swift", &["swift"]),
    ("tcl", &["tcl"]),
    ("toml", &["toml"]),
    ("tsx", &["tsx"]),
    ("twig", &["twig"]),
    ("typescript", &["ts", "mts", "cts"]),
    ("vb", &["vb"]),
    ("verilog", &["v", "sv"]),
    ("vhdl", &["vhd", "vhdl"]),
    ("yaml", &["yml", "yaml"]),
    ("zig", &["zig"]),
];

/// Identifiers of all built-in formats.
pub fn supported_formats() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().map(|(format, _)| *format)
}

/// Extensions the built-in table maps to `format`.
pub fn extensions_of(format: &str) -> &'static [&'static str] {
    FORMATS
        .iter()
        .find(|(name, _)| *name == format)
        .map(|(_, exts)| *exts)
        .unwrap_or(&[])
}

/// Extension of a path as seen by format detection: everything after the
/// last `.` of the file name, or empty when there is none. A leading dot
/// alone (`.bashrc`) does not start an extension.
pub fn extension_of(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// Detect the format of `path`.
///
/// When `formats_exts` is non-empty only those overrides are consulted, in
/// declaration order; otherwise the built-in table is used.
pub fn format_of(path: &Path, formats_exts: &IndexMap<String, Vec<String>>) -> Option<String> {
    let ext = extension_of(path);

    if !formats_exts.is_empty() {
        return formats_exts
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| e == ext))
            .map(|(format, _)| format.clone());
    }

    if ext.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find(|(_, exts)| exts.contains(&ext))
        .map(|(format, _)| (*format).to_string())
}
