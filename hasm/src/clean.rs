use crate::CleanLine;


/// Strips `//` comments and all whitespace, dropping lines left empty.
/// Line numbers are 1-based and refer to `src`.
pub fn clean(src: &str) -> Vec<CleanLine> {
    src.lines()
        .zip(1..)
        .filter_map(|(line, n)| {
            let code = line.split_once("//").map_or(line, |(code, _)| code);
            let text: String = code.chars().filter(|c| !c.is_whitespace()).collect();
            (!text.is_empty()).then(|| CleanLine::new(n, text))
        })
        .collect()
}
