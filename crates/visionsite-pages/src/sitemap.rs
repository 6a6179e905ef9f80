use visionsite_jsonld::absolute_url;

/// XML sitemap listing `paths` in the order given.
pub fn render<I, S>(base_url: &str, paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in paths {
        let loc = absolute_url(base_url, path.as_ref());
        xml.push_str("  <url><loc>");
        xml.push_str(&escape(&loc));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_in_order() {
        let xml = render("https://example.com", ["/", "/about", "/lp/a&b"]);
        let home = xml.find("<loc>https://example.com/</loc>").unwrap();
        let about = xml.find("<loc>https://example.com/about</loc>").unwrap();
        assert!(home < about);
        assert!(xml.contains("/lp/a&amp;b"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
