/// JSDoc block for `text`; nothing for blank text.
pub(super) fn doc_comment(text: &str) -> Vec<String> {
  let text = text.trim();
  if text.is_empty() {
    return vec![];
  }

  let escaped = text.replace("*/", "*\\/");
  let lines: Vec<&str> = escaped.lines().map(str::trim_end).collect();
  if let [single] = lines.as_slice() {
    return vec![format!("/** {single} */")];
  }

  let mut block = Vec::with_capacity(lines.len() + 2);
  block.push("/**".to_string());
  block.extend(lines.iter().map(|line| if line.is_empty() { " *".to_string() } else { format!(" * {line}") }));
  block.push(" */".to_string());
  block
}
