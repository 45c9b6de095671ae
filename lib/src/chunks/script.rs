//! `Lscr` — handler table, properties, globals, literals, and bytecode
//! (spec §3 `Script`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::chunks::opcode::{decode_instructions, Instruction};
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug)]
pub enum Literal {
    Str(String),
    Int(i32),
    Float(f32),
    Other(Vec<u8>),
}

#[derive(Clone, Debug)]
pub struct Handler {
    pub name_id: u32,
    pub arg_name_ids: Vec<u32>,
    pub local_name_ids: Vec<u32>,
    pub bytecode_offset: u32,
    pub bytecode_length: u32,
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug)]
pub struct ScriptChunk {
    pub handlers: Vec<Handler>,
    pub properties: Vec<u32>,
    pub globals: Vec<u32>,
    pub literals: Vec<Literal>,
}

impl ScriptChunk {
    /// `capital_x` comes from the script context's tag (`Lctx` vs `LctX`,
    /// spec §4.1 pass 2) and selects between 16-bit and 32-bit widths for
    /// the handler table's count/id fields.
    pub fn decode(r: &mut BinaryReader, capital_x: bool) -> Result<Self, ChunkDecodeError> {
        let _total_length = r.read_u32()?;
        let _header_length = r.read_u32()?;
        let handler_vector_offset = r.read_u32()?;
        let properties_offset = r.read_u32()?;
        let globals_offset = r.read_u32()?;
        let literal_types_offset = r.read_u32()?;
        let literal_pool_offset = r.read_u32()?;
        let handler_count = r.read_u16()?;
        let property_count = r.read_u16()?;
        let global_count = r.read_u16()?;
        let literal_count = r.read_u16()?;

        let handlers = Self::decode_handlers(r, handler_vector_offset, handler_count, capital_x)?;
        let properties = Self::decode_id_table(r, properties_offset, property_count)?;
        let globals = Self::decode_id_table(r, globals_offset, global_count)?;
        let literals =
            Self::decode_literals(r, literal_types_offset, literal_pool_offset, literal_count)?;

        Ok(ScriptChunk { handlers, properties, globals, literals })
    }

    fn decode_id_table(
        r: &mut BinaryReader,
        offset: u32,
        count: u16,
    ) -> Result<Vec<u32>, ChunkDecodeError> {
        r.seek(offset as usize)?;
        (0..count).map(|_| r.read_u32()).collect()
    }

    fn decode_handlers(
        r: &mut BinaryReader,
        offset: u32,
        count: u16,
        capital_x: bool,
    ) -> Result<Vec<Handler>, ChunkDecodeError> {
        r.seek(offset as usize)?;
        let mut handlers = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name_id = if capital_x { r.read_u32()? } else { u32::from(r.read_u16()?) };
            let arg_count = if capital_x { r.read_u32()? } else { u32::from(r.read_u16()?) };
            let arg_offset = r.read_u32()?;
            let local_count = if capital_x { r.read_u32()? } else { u32::from(r.read_u16()?) };
            let local_offset = r.read_u32()?;
            let bytecode_offset = r.read_u32()?;
            let bytecode_length = r.read_u32()?;

            let mut sub = r.clone();
            let arg_name_ids = Self::decode_id_list_u16(&mut sub, arg_offset, arg_count)?;
            let local_name_ids = Self::decode_id_list_u16(&mut sub, local_offset, local_count)?;

            let code = r.clone();
            let instructions = if let Ok(body) = {
                let mut body_reader = code.clone();
                body_reader.seek(bytecode_offset as usize).ok();
                body_reader.read_bytes(bytecode_length as usize)
            } {
                decode_instructions(body, 0)
            } else {
                Vec::new()
            };

            handlers.push(Handler {
                name_id,
                arg_name_ids,
                local_name_ids,
                bytecode_offset,
                bytecode_length,
                instructions,
            });
        }
        Ok(handlers)
    }

    fn decode_id_list_u16(
        r: &mut BinaryReader,
        offset: u32,
        count: u32,
    ) -> Result<Vec<u32>, ChunkDecodeError> {
        r.seek(offset as usize)?;
        (0..count).map(|_| Ok(u32::from(r.read_u16()?))).collect()
    }

    fn decode_literals(
        r: &mut BinaryReader,
        types_offset: u32,
        pool_offset: u32,
        count: u16,
    ) -> Result<Vec<Literal>, ChunkDecodeError> {
        r.seek(types_offset as usize)?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let kind = r.read_u32()?;
            let rel_offset = r.read_u32()?;
            entries.push((kind, rel_offset));
        }

        let mut literals = Vec::with_capacity(entries.len());
        for (kind, rel_offset) in entries {
            let abs_offset = pool_offset + rel_offset;
            let mut pool = r.clone();
            pool.seek(abs_offset as usize)?;
            let literal = match kind {
                1 => Literal::Str(pool.read_pascal_str_u16().unwrap_or_default()),
                4 => Literal::Int(pool.read_i32().unwrap_or(0)),
                9 => Literal::Float(pool.read_f32().unwrap_or(0.0)),
                _ => Literal::Other(pool.rest().to_vec()),
            };
            literals.push(literal);
        }
        Ok(literals)
    }
}
