//! ES module syntax lowered to a small in-bundle module registry.
//!
//! Every script becomes a factory `function (module, exports, require)`
//! registered under its source-relative path. Import specifiers are resolved
//! at build time against the bundled paths, so the runtime only looks ids up.
//! Only top-of-line `import`/`export` statements are rewritten.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Registry and loader emitted once at the top of every bundle
pub const RUNTIME: &str = r#"var __spa_modules = {};
var __spa_cache = {};
function __spa_require(id) {
    if (__spa_cache[id]) { return __spa_cache[id].exports; }
    var factory = __spa_modules[id];
    if (!factory) { throw new Error("Cannot find module '" + id + "'"); }
    var module = { exports: {} };
    __spa_cache[id] = module;
    factory(module, module.exports, __spa_require);
    return module.exports;
}
"#;

const IDENT: &str = r"[A-Za-z_$][\w$]*";
const FROM: &str = r#"\s*from\s*['"]([^'"]+)['"][ \t]*;?"#;

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?m)^{pattern}")).ok()
}

static IMPORT_DEFAULT_AND_NAMED: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"import\s+({IDENT})\s*,\s*\{{([^}}]*)\}}{FROM}")));
static IMPORT_NAMED: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"import\s*\{{([^}}]*)\}}{FROM}")));
static IMPORT_NAMESPACE: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"import\s*\*\s*as\s+({IDENT}){FROM}")));
static IMPORT_DEFAULT: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"import\s+({IDENT}){FROM}")));
static IMPORT_BARE: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r#"import\s*['"]([^'"]+)['"][ \t]*;?"#));
static EXPORT_ALL_FROM: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"export\s*\*{FROM}")));
static EXPORT_LIST_FROM: Lazy<Option<Regex>> =
    Lazy::new(|| compile(&format!(r"export\s*\{{([^}}]*)\}}{FROM}")));
static EXPORT_LIST: Lazy<Option<Regex>> = Lazy::new(|| compile(r"export\s*\{([^}]*)\}[ \t]*;?"));
static EXPORT_DEFAULT: Lazy<Option<Regex>> = Lazy::new(|| compile(r"export\s+default\s+"));
static EXPORT_DECL: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(&format!(
        r"export\s+(const|let|var|async\s+function\*?|function\*?|class)\s+({IDENT})"
    ))
});

/// `a, b as c` into `(local, exported)` pairs
fn specifiers(list: &str) -> Vec<(String, String)> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.split_once(" as ") {
            Some((local, exported)) => (local.trim().to_string(), exported.trim().to_string()),
            None => (s.to_string(), s.to_string()),
        })
        .collect()
}

/// Turn `{ a, b as c }` into the destructuring pattern `{ a, b: c }`.
fn destructure(list: &str) -> String {
    let fields: Vec<String> = specifiers(list)
        .into_iter()
        .map(|(imported, local)| {
            if imported == local {
                local
            } else {
                format!("{imported}: {local}")
            }
        })
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

/// Module id an import specifier refers to.
///
/// Relative specifiers are joined onto the importing module's directory and
/// tried with each extension against `known`. Anything unresolved is
/// returned unchanged and fails at runtime with "Cannot find module".
#[must_use]
pub fn resolve_specifier(
    from: &str,
    specifier: &str,
    known: &[&str],
    extensions: &[String],
) -> String {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return specifier.to_string();
    }
    let mut parts: Vec<&str> = from.split('/').collect();
    parts.pop();
    for seg in specifier.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    let base = parts.join("/");
    extensions
        .iter()
        .map(|ext| format!("{base}{ext}"))
        .find(|candidate| known.contains(&candidate.as_str()))
        .unwrap_or(base)
}

fn replace(
    re: &Lazy<Option<Regex>>,
    source: &str,
    f: impl FnMut(&Captures) -> String,
) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(source, f).into_owned(),
        None => source.to_string(),
    }
}

/// Rewrite one module's `import`/`export` statements into registry calls.
#[must_use]
pub fn lower_module(id: &str, source: &str, known: &[&str], extensions: &[String]) -> String {
    let target = |specifier: &str| {
        let resolved = resolve_specifier(id, specifier, known, extensions);
        serde_json::Value::String(resolved).to_string()
    };
    let mut exported: Vec<(String, String)> = Vec::new();

    let mut out = replace(&IMPORT_DEFAULT_AND_NAMED, source, |c| {
        let module = target(&c[3]);
        format!(
            "var {} = require({module}).default; var {} = require({module});",
            &c[1],
            destructure(&c[2])
        )
    });
    out = replace(&IMPORT_NAMED, &out, |c| {
        format!("var {} = require({});", destructure(&c[1]), target(&c[2]))
    });
    out = replace(&IMPORT_NAMESPACE, &out, |c| {
        format!("var {} = require({});", &c[1], target(&c[2]))
    });
    out = replace(&IMPORT_DEFAULT, &out, |c| {
        format!("var {} = require({}).default;", &c[1], target(&c[2]))
    });
    out = replace(&IMPORT_BARE, &out, |c| format!("require({});", target(&c[1])));
    out = replace(&EXPORT_ALL_FROM, &out, |c| {
        format!("Object.assign(exports, require({}));", target(&c[1]))
    });
    out = replace(&EXPORT_LIST_FROM, &out, |c| {
        let assigns: Vec<String> = specifiers(&c[1])
            .into_iter()
            .map(|(local, name)| format!("exports.{name} = m.{local};"))
            .collect();
        format!("(function (m) {{ {} }})(require({}));", assigns.join(" "), target(&c[2]))
    });
    out = replace(&EXPORT_LIST, &out, |c| {
        exported.extend(specifiers(&c[1]));
        String::new()
    });
    out = replace(&EXPORT_DEFAULT, &out, |_| "exports.default = ".to_string());
    out = replace(&EXPORT_DECL, &out, |c| {
        exported.push((c[2].to_string(), c[2].to_string()));
        format!("{} {}", &c[1], &c[2])
    });

    if !out.ends_with('\n') {
        out.push('\n');
    }
    for (local, name) in &exported {
        out.push_str(&format!("exports.{name} = {local};\n"));
    }
    format!(
        "__spa_modules[{}] = function (module, exports, require) {{\n{out}}};\n",
        serde_json::Value::String(id.to_string())
    )
}
