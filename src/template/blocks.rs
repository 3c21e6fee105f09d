#![forbid(unsafe_code)]

//! Generated Swift fragments for the marker blocks

use crate::palette::Palette;

pub const KEYCASE_START: &str = "//KEYCASE_START";
pub const KEYCASE_END: &str = "//KEYCASE_END";
pub const DICTIONARY_START: &str = "//DICTIONARY_START";
pub const DICTIONARY_END: &str = "//DICTIONARY_END";

/// Swift identifier for a color name: spaces removed, first letter lower-cased
///
/// `"Deep Blue"` becomes `"deepBlue"`.
pub fn identifier(name: &str) -> String {
    let compact: String = name.chars().filter(|c| *c != ' ').collect();
    let compact = compact.trim();

    let mut chars = compact.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Enum case block, one `case` per palette key
///
/// ```text
/// //KEYCASE_START
/// 	case deepBlue
/// 	//KEYCASE_END
/// ```
pub fn case_block(palette: &Palette) -> String {
    let mut block = String::from(KEYCASE_START);
    for name in palette.keys() {
        block.push_str("\n\tcase ");
        block.push_str(&identifier(name));
    }
    block.push_str("\n\t");
    block.push_str(KEYCASE_END);
    block
}

/// Dictionary literal block mapping each case to a `UIColor`
pub fn dictionary_block(palette: &Palette) -> String {
    let mut block = String::from(DICTIONARY_START);
    for (name, color) in palette.iter() {
        block.push_str(&format!(
            "\n\t.{} : UIColor(red: {:?}, green: {:?}, blue: {:?}, alpha: {:?}),",
            identifier(name),
            color.red(),
            color.green(),
            color.blue(),
            color.alpha()
        ));
    }
    block.push_str("\n\t");
    block.push_str(DICTIONARY_END);
    block
}
