//! Fixed Lua snippets placed at the top of a generated spec.

use super::normalize::LineNormalization;

/// Name of the multi-line normalization helper in generated specs
pub const NORMALIZE_FN: &str = "normalize_events";

/// Name of the file loading helper in generated specs
pub const LOAD_FILE_FN: &str = "load_file";

/// Turn a module name into a usable local variable name (`yaml.parser` becomes
/// `yaml_parser`).
pub fn identifier(module: &str) -> String {
    let mut ident: String = module
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// `local <ident> = require("<module>")`
pub fn require(module: &str) -> String {
    format!(
        "local {} = require(\"{}\")",
        identifier(module),
        crate::escape::escape(module)
    )
}

/// Reads a whole file in binary mode, so carriage returns survive.
pub fn load_file_helper() -> String {
    format!(
        r#"local function {LOAD_FILE_FN}(file_path)
  local file = io.open(file_path, "rb")
  if not file then
    return nil, "File not found"
  end
  local content = file:read("*all")
  file:close()
  return content
end
"#
    )
}

/// Per-line strip helper plus the multi-line helper built on it.
///
/// Mirrors [`LineNormalization::apply`].
pub fn normalize_helpers(normalization: LineNormalization) -> String {
    let strip = normalization.lua_helper_name();
    let pattern = normalization.lua_pattern();
    format!(
        r#"local function {strip}(line)
  return (line:gsub("{pattern}", ""))
end

local function {NORMALIZE_FN}(text)
  local lines = {{}}
  for line in text:gmatch("[^\r\n]+") do
    local stripped = {strip}(line)
    if stripped ~= "" then
      table.insert(lines, stripped)
    end
  end
  table.insert(lines, "")
  return table.concat(lines, "\n")
end
"#
    )
}
