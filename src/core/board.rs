//! Board and FPGA catalogs
//!
//! Parses the boards.toml and fpgas.toml resource tables and renders them
//! for `fpgaflow boards`.

use serde::{Deserialize, Serialize};

/// A supported development board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardInfo {
    /// Board id, as used in project files
    pub name: String,

    /// Human readable description
    #[serde(default)]
    pub description: String,

    /// FPGA part mounted on the board
    pub fpga: String,

    /// Programmer used to upload bitstreams
    #[serde(default)]
    pub programmer: Option<String>,
}

/// Board table (boards.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardTable {
    #[serde(rename = "board", default)]
    pub boards: Vec<BoardInfo>,
}

impl BoardTable {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlay project-specific boards
    ///
    /// Boards with a known name replace the built-in entry in place; new
    /// boards are appended.
    pub fn merge(&mut self, overlay: BoardTable) {
        for board in overlay.boards {
            match self.boards.iter_mut().find(|b| b.name == board.name) {
                Some(existing) => *existing = board,
                None => self.boards.push(board),
            }
        }
    }

    /// Look up a board by name
    pub fn get(&self, name: &str) -> Option<&BoardInfo> {
        self.boards.iter().find(|b| b.name == name)
    }
}

/// A supported FPGA part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FpgaInfo {
    /// Part id
    pub part: String,

    /// Architecture family (ice40, ecp5, gowin)
    pub arch: String,

    /// Device type within the family
    #[serde(rename = "type")]
    pub kind: String,

    /// Package/size designator
    #[serde(default)]
    pub size: String,
}

/// FPGA table (fpgas.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FpgaTable {
    #[serde(rename = "fpga", default)]
    pub fpgas: Vec<FpgaInfo>,
}

impl FpgaTable {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Render the board list as an aligned table
pub fn format_boards(boards: &[BoardInfo]) -> String {
    let name_width = column_width("Board", boards.iter().map(|b| b.name.as_str()));
    let fpga_width = column_width("FPGA", boards.iter().map(|b| b.fpga.as_str()));

    let mut out = format!("{:<name_width$}  {:<fpga_width$}  Programmer\n", "Board", "FPGA");
    for board in boards {
        out.push_str(&format!(
            "{:<name_width$}  {:<fpga_width$}  {}\n",
            board.name,
            board.fpga,
            board.programmer.as_deref().unwrap_or("-"),
        ));
    }
    out.push_str(&format!("\n{} board(s) available.\n", boards.len()));
    out
}

/// Render the FPGA list as an aligned table
pub fn format_fpgas(fpgas: &[FpgaInfo]) -> String {
    let part_width = column_width("FPGA", fpgas.iter().map(|f| f.part.as_str()));
    let arch_width = column_width("Arch", fpgas.iter().map(|f| f.arch.as_str()));
    let kind_width = column_width("Type", fpgas.iter().map(|f| f.kind.as_str()));

    let mut out = format!(
        "{:<part_width$}  {:<arch_width$}  {:<kind_width$}  Size\n",
        "FPGA", "Arch", "Type"
    );
    for fpga in fpgas {
        out.push_str(&format!(
            "{:<part_width$}  {:<arch_width$}  {:<kind_width$}  {}\n",
            fpga.part, fpga.arch, fpga.kind, fpga.size
        ));
    }
    out.push_str(&format!("\n{} FPGA(s) available.\n", fpgas.len()));
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).max().unwrap_or(0).max(header.len())
}
