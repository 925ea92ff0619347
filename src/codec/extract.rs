//! Snippet extraction from org note bodies.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline `\(..\)`, display `\[..\]`, `equation`/`align` environments (starred or not) and org
/// `equation`/`latex` blocks. One capture group per alternative.
static LATEX_SNIPPET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)",
        r"\\\((.*?)\\\)",
        r"|\\\[(.*?)\\\]",
        r"|\\begin\{equation\*?\}(.*?)\\end\{equation\*?\}",
        r"|\\begin\{align\*?\}(.*?)\\end\{align\*?\}",
        r"|(?i:#\+begin_equation)(.*?)(?i:#\+end_equation)",
        r"|(?i:#\+begin_latex)(.*?)(?i:#\+end_latex)",
        r"|(?i:#\+begin_export[ \t]+latex)(.*?)(?i:#\+end_export)",
    ))
    .expect("latex snippet pattern is valid")
});

static SRC_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ims)^[ \t]*#\+begin_src[ \t]*(\S*)[^\n]*\n(.*?)^[ \t]*#\+end_src")
        .expect("source block pattern is valid")
});

/// Every non-empty LaTeX snippet in `body`, in text order. Repeats are kept.
pub fn latex_snippets(body: &str) -> Vec<String> {
    LATEX_SNIPPET
        .captures_iter(body)
        .flat_map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|snippet| !snippet.is_empty())
        .collect()
}

/// `(language, code)` for each `#+BEGIN_SRC` .. `#+END_SRC` block in `body`. The language is
/// empty when the block header omits it; code is trimmed.
pub fn source_blocks(body: &str) -> Vec<(String, String)> {
    SRC_BLOCK
        .captures_iter(body)
        .map(|caps| {
            let lang = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            (lang.to_string(), code.trim().to_string())
        })
        .collect()
}
