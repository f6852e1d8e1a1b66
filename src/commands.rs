use crate::error::Result;
use crate::utils::{CommandWriter, ToPayload};
//# Naming conventions follow the ZFM / R30x family datasheets, which all share this instruction set.

/// Instruction codes understood by the sensor.
pub mod instruction {
    pub const GEN_IMG: u8 = 0x01;
    pub const IMG_2_TZ: u8 = 0x02;
    pub const MATCH: u8 = 0x03;
    pub const SEARCH: u8 = 0x04;
    pub const REG_MODEL: u8 = 0x05;
    pub const STORE: u8 = 0x06;
    pub const LOAD_CHAR: u8 = 0x07;
    pub const DELET_CHAR: u8 = 0x0C;
    pub const EMPTY: u8 = 0x0D;
    pub const READ_SYS_PARA: u8 = 0x0F;
    pub const VFY_PWD: u8 = 0x13;
    pub const TEMPLATE_NUM: u8 = 0x1D;
}

/// Enum for commands one can send to the sensor. Names match the datasheet.
///
/// Only the payload (instruction code + parameters) is described here; the frame around it is
/// built by the packet codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Captures an image of the fingerprint into the image buffer.
    GenImg,

    /// Processes the image buffer into a _character buffer_.
    Img2Tz {
        /// Which buffer to store the processed fingerprint data into (there are 2).
        ///
        /// **Note:** The buffers are named **1** and **2**. Any other value defaults to 2.
        buffer: u8,
    },

    /// Compares character buffers 1 and 2.
    Match,

    /// Matches a character buffer against a range of stored templates.
    Search {
        /// Character buffer holding the finger to look for.
        buffer: u8,

        /// First library page to search.
        start_index: u16,

        /// Number of pages to search, starting from `start_index`.
        page_count: u16,
    },

    /// Merges character buffers 1 and 2 into a template, left in both buffers.
    RegModel,

    /// Stores the template in `buffer` at library page `index`.
    Store { buffer: u8, index: u16 },

    /// Loads the template at library page `index` into `buffer`.
    LoadChar { buffer: u8, index: u16 },

    /// Deletes `count` templates starting at library page `start_index`.
    DeletChar { start_index: u16, count: u16 },

    /// Deletes every template in the library.
    Empty,

    /// Reads system status and basic configuration.
    ReadSysPara,

    /// Performs a handshake with the device to verify the password.
    /// The default password is 0x00000000.
    VfyPwd {
        /// The device password.
        password: u32,
    },

    /// Reads the number of valid templates in the library.
    TemplateNum,
}

impl Command {
    /// The instruction code sent as the first payload byte.
    pub fn instruction(&self) -> u8 {
        match self {
            Self::GenImg => instruction::GEN_IMG,
            Self::Img2Tz { .. } => instruction::IMG_2_TZ,
            Self::Match => instruction::MATCH,
            Self::Search { .. } => instruction::SEARCH,
            Self::RegModel => instruction::REG_MODEL,
            Self::Store { .. } => instruction::STORE,
            Self::LoadChar { .. } => instruction::LOAD_CHAR,
            Self::DeletChar { .. } => instruction::DELET_CHAR,
            Self::Empty => instruction::EMPTY,
            Self::ReadSysPara => instruction::READ_SYS_PARA,
            Self::VfyPwd { .. } => instruction::VFY_PWD,
            Self::TemplateNum => instruction::TEMPLATE_NUM,
        }
    }
}

impl ToPayload for Command {
    fn to_payload(&self, writer: &mut dyn CommandWriter) -> Result<()> {
        writer.write_cmd_bytes(&[self.instruction()])?;
        match self {
            Self::GenImg
            | Self::Match
            | Self::RegModel
            | Self::Empty
            | Self::ReadSysPara
            | Self::TemplateNum => Ok(()),

            // bufid  | buffer [1]
            Self::Img2Tz { buffer } => writer.write_cmd_bytes(&[*buffer]),

            // bufid  | buffer [1]
            // sstart | start_index [2]
            // snum   | page_count [2]
            Self::Search { buffer, start_index, page_count } => {
                writer.write_cmd_bytes(&[*buffer])?;
                writer.write_cmd_bytes(&start_index.to_be_bytes()[..])?;
                writer.write_cmd_bytes(&page_count.to_be_bytes()[..])
            }

            // bufid  | buffer [1]
            // pageid | index [2]
            Self::Store { buffer, index } | Self::LoadChar { buffer, index } => {
                writer.write_cmd_bytes(&[*buffer])?;
                writer.write_cmd_bytes(&index.to_be_bytes()[..])
            }

            // pageid | start_index [2]
            // n      | count [2]
            Self::DeletChar { start_index, count } => {
                writer.write_cmd_bytes(&start_index.to_be_bytes()[..])?;
                writer.write_cmd_bytes(&count.to_be_bytes()[..])
            }

            // passwd | password [4]
            Self::VfyPwd { password } => writer.write_cmd_bytes(&password.to_be_bytes()[..]),
        }
    }
}
