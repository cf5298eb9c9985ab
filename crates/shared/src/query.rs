use crate::form::FormSnapshot;

/// Base path of the image-generating endpoint.
pub const IMAGE_PATH: &str = "/lorem";

/// Initial value of the font-size range control.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Escapes free text for the `s` parameter.
///
/// This is not percent-encoding: whitespace becomes `+`, and the characters
/// `&`, `=`, `;`, `%` become their full-width lookalikes `＆`, `＝`, `；`,
/// `％`. Everything else passes through as raw UTF-8. The substitution is a
/// single pass over the original characters, so replacement output is never
/// re-matched and full-width glyphs already present in the input are left
/// alone.
pub fn encode_text(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            ch if ch.is_whitespace() => '+',
            '&' => '＆',
            '=' => '＝',
            ';' => '；',
            '%' => '％',
            other => other,
        })
        .collect()
}

/// Assembles the image request URI from a snapshot.
///
/// Parameter order is fixed: `w`, `h`, `fs`, then `s`, `p`, `t` when
/// present. The numeric fields pass through unvalidated. Absence of an
/// optional segment is meaningful — an unchecked box sends no `p` at all,
/// never `p=0`.
pub fn build_image_uri(snapshot: &FormSnapshot) -> String {
    let mut uri = format!(
        "{IMAGE_PATH}?w={}&h={}&fs={}",
        snapshot.width, snapshot.height, snapshot.font_size
    );
    if !snapshot.text.is_empty() {
        uri.push_str("&s=");
        uri.push_str(&encode_text(&snapshot.text));
    }
    if snapshot.has_property {
        uri.push_str("&p=1");
    }
    if let Some(image_type) = snapshot.image_type.as_deref() {
        uri.push_str("&t=");
        uri.push_str(image_type);
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        width: &str,
        height: &str,
        font_size: &str,
        text: &str,
        has_property: bool,
        image_type: Option<&str>,
    ) -> FormSnapshot {
        FormSnapshot {
            width: width.into(),
            height: height.into(),
            font_size: font_size.into(),
            text: text.into(),
            has_property,
            image_type: image_type.map(Into::into),
        }
    }

    #[test]
    fn full_form_produces_every_segment_in_order() {
        let uri = build_image_uri(&snapshot(
            "300",
            "200",
            "14",
            "Hi there",
            true,
            Some("png"),
        ));
        assert_eq!(uri, "/lorem?w=300&h=200&fs=14&s=Hi+there&p=1&t=png");
    }

    #[test]
    fn minimal_form_produces_only_mandatory_segments() {
        let uri = build_image_uri(&snapshot("100", "100", "14", "", false, None));
        assert_eq!(uri, "/lorem?w=100&h=100&fs=14");
    }

    #[test]
    fn empty_text_omits_the_s_segment_entirely() {
        let uri = build_image_uri(&snapshot("10", "10", "14", "", true, Some("gif")));
        assert!(!uri.contains("&s="));
        assert_eq!(uri, "/lorem?w=10&h=10&fs=14&p=1&t=gif");
    }

    #[test]
    fn metacharacters_swap_for_full_width_lookalikes() {
        assert_eq!(encode_text("a&b=c;d%e"), "a＆b＝c；d％e");
    }

    #[test]
    fn plain_text_is_a_fixed_point() {
        assert_eq!(encode_text("PlainText123"), "PlainText123");
    }

    #[test]
    fn every_whitespace_kind_becomes_plus() {
        assert_eq!(encode_text("a b\tc\nd"), "a+b+c+d");
    }

    #[test]
    fn full_width_glyphs_in_the_input_pass_through() {
        assert_eq!(encode_text("ｘ＆ｙ＝ｚ"), "ｘ＆ｙ＝ｚ");
    }

    #[test]
    fn raw_numeric_text_is_not_validated() {
        let uri = build_image_uri(&snapshot("abc", "-5", "huge", "", false, None));
        assert_eq!(uri, "/lorem?w=abc&h=-5&fs=huge");
    }
}
