/// Converts Eastern Arabic-Indic digits (U+0660..=U+0669) to their ASCII
/// counterparts in a single left-to-right pass. Every other character
/// passes through verbatim, so the result preserves length in characters
/// and order, and the function is the identity on strings containing no
/// Arabic-Indic digits.
pub fn arabic_to_ascii_digits(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{0660}'..='\u{0669}' => {
                let digit = (ch as u32 - 0x0660) as u8;
                out.push(char::from(b'0' + digit));
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_full_digit_table_in_order() {
        assert_eq!(arabic_to_ascii_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
    }

    #[test]
    fn identity_on_ascii_input() {
        assert_eq!(arabic_to_ascii_digits(""), "");
        assert_eq!(arabic_to_ascii_digits("1500.25"), "1500.25");
        assert_eq!(arabic_to_ascii_digits("no digits here"), "no digits here");
    }

    #[test]
    fn mixed_input_is_handled_per_character() {
        assert_eq!(arabic_to_ascii_digits("١2٣"), "123");
        assert_eq!(arabic_to_ascii_digits("price:١٢٠"), "price:120");
        assert_eq!(arabic_to_ascii_digits("٩٩ SAR"), "99 SAR");
    }

    #[test]
    fn non_digit_arabic_text_passes_through() {
        assert_eq!(arabic_to_ascii_digits("سعر ١٢٣"), "سعر 123");
    }
}
