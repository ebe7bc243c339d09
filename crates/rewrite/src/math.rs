//! Math images: equations rendered by a remote service become
//! `<app-latex>` elements holding the expression itself.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use scraper::Html;

use crate::Options;
use crate::consts::{IMAGE_SELECTOR, MATH_ELEMENT, MATH_NOISE, MATH_SPACED_COMMANDS};
use crate::dom::{element, element_at, has_host, parent_named, select_ids, substitute, text};

/// Strip renderer-only directives from a LaTeX expression.
///
/// ```text
/// \bg_black&space;\Delta&space;x  ->  \Delta x
/// ```
pub fn clean_expression(expression: &str) -> String {
    let mut cleaned = MATH_NOISE.iter().fold(expression.to_string(), |acc, noise| acc.replace(noise, ""));
    for command in MATH_SPACED_COMMANDS {
        cleaned = cleaned.replace(command, &format!("{command} "));
    }
    cleaned.trim().to_string()
}

/// The expression carried in the query component of a math image URL.
fn expression(src: &str) -> Option<Cow<'_, str>> {
    let (_, query) = src.split_once('?')?;
    Some(percent_decode_str(query).decode_utf8_lossy())
}

/// Convert every math image, returning how many were converted.
pub(crate) fn rewrite(html: &mut Html, options: &Options) -> usize {
    let mut converted = 0;
    for id in select_ids(html, &IMAGE_SELECTOR) {
        let Some(src) = element_at(html, id).and_then(|image| image.attr("src")) else {
            continue;
        };
        if !has_host(src, &options.math_host) {
            continue;
        }
        let Some(cleaned) = expression(src).map(|expression| clean_expression(&expression)) else {
            tracing::warn!(src, "Math image has no expression, leaving it in place");
            continue;
        };
        // A link to the equation editor around the image goes too.
        let target = parent_named(html, id, "a")
            .filter(|&link| {
                element_at(html, link)
                    .and_then(|link| link.attr("href"))
                    .is_some_and(|href| has_host(href, &options.math_link_host))
            })
            .unwrap_or(id);
        if substitute(html, target, element(MATH_ELEMENT, []), [text(&cleaned)]) {
            tracing::debug!(expression = %cleaned, "Converted math image");
            converted += 1;
        }
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scraper::Selector;

    fn run(source: &str) -> (String, usize) {
        let mut html = Html::parse_fragment(source);
        let count = rewrite(&mut html, &Options::default());
        (html.root_element().inner_html(), count)
    }

    #[rstest]
    #[case(r"\bg_black&space;x^2", "x^2")]
    #[case(r"\small&space;\Delta&space;E", r"\Delta E")]
    #[case(r"\color{White}\rho", r"\rho")]
    #[case(r"  a+b  ", "a+b")]
    #[case(r"\Delta\rho", r"\Delta \rho")]
    fn test_clean_expression(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_expression(input), expected);
    }

    #[test]
    fn test_image_is_replaced() {
        let (output, count) = run(r#"<p>Energy: <img src="https://latex.codecogs.com/gif.latex?\bg_black&amp;space;E=mc^2"> done</p>"#);
        assert_eq!(count, 1);
        assert_eq!(output, "<p>Energy: <app-latex>E=mc^2</app-latex> done</p>");
    }

    #[test]
    fn test_expression_is_percent_decoded() {
        let (output, _) = run(r#"<img src="https://latex.codecogs.com/gif.latex?a%20%2B%20b">"#);
        assert_eq!(output, "<app-latex>a + b</app-latex>");
    }

    #[test]
    fn test_decoded_space_after_spaced_command_is_kept() {
        let (output, _) = run(r#"<img src="https://latex.codecogs.com/gif.latex?\Delta%20x">"#);
        assert_eq!(output, "<app-latex>\\Delta  x</app-latex>");
    }

    #[test]
    fn test_configured_hosts_ignore_case() {
        let options = Options {
            math_host: "LaTeX.CodeCogs.com".to_string(),
            math_link_host: "WWW.CodeCogs.com".to_string(),
            ..Options::default()
        };
        let mut html = Html::parse_fragment(concat!(
            r#"<a href="https://www.codecogs.com/eqnedit.php?latex=x">"#,
            r#"<img src="https://latex.codecogs.com/gif.latex?x"></a>"#,
        ));
        assert_eq!(rewrite(&mut html, &options), 1);
        assert_eq!(html.root_element().inner_html(), "<app-latex>x</app-latex>");
    }

    #[test]
    fn test_editor_link_is_replaced_with_image() {
        let (output, count) = run(concat!(
            r#"<p><a href="https://www.codecogs.com/eqnedit.php?latex=x">"#,
            r#"<img src="https://latex.codecogs.com/gif.latex?x"></a></p>"#,
        ));
        assert_eq!(count, 1);
        assert_eq!(output, "<p><app-latex>x</app-latex></p>");
    }

    #[test]
    fn test_other_links_are_kept() {
        let (output, _) = run(r#"<a href="https://example.com/"><img src="https://latex.codecogs.com/gif.latex?x"></a>"#);
        assert_eq!(output, r#"<a href="https://example.com/"><app-latex>x</app-latex></a>"#);
    }

    #[test]
    fn test_non_math_images_are_ignored() {
        let (output, count) = run(r#"<img src="https://example.com/gif.latex?x">"#);
        assert_eq!(count, 0);
        let html = Html::parse_fragment(&output);
        assert_eq!(html.select(&Selector::parse("img").unwrap()).count(), 1);
    }

    #[test]
    fn test_image_without_expression_is_kept() {
        let (output, count) = run(r#"<img src="https://latex.codecogs.com/gif.latex">"#);
        assert_eq!(count, 0);
        assert!(output.starts_with("<img"));
    }
}
