//! Symbolic disassembly: resolves raw instruction operands against a
//! handler's name tables and a script's literal pool (spec §4.3
//! "Disassembler").

use crate::chunks::opcode::{Instruction, Opcode};
use crate::chunks::script::{Handler, Literal, ScriptChunk};
use crate::chunks::script_names::ScriptNamesChunk;

/// One disassembled line, already formatted as `[offset] MNEMONIC arg`
/// (spec §4.3).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisassembledLine {
    pub offset: u32,
    pub mnemonic: &'static str,
    pub operand: Option<String>,
}

impl std::fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "[{}] {} {}", self.offset, self.mnemonic, operand),
            None => write!(f, "[{}] {}", self.offset, self.mnemonic),
        }
    }
}

/// Disassemble every instruction of `handler`, resolving symbolic operands
/// through `names` (for globals/props/calls) and `script.literals` (for
/// pushed literals). Never fails: unresolvable references fall back to their
/// raw numeric form rather than aborting the whole handler.
pub fn disassemble_handler(
    handler: &Handler,
    script: &ScriptChunk,
    names: &ScriptNamesChunk,
) -> Vec<DisassembledLine> {
    handler.instructions.iter().map(|instr| disassemble_instruction(instr, handler, script, names)).collect()
}

fn disassemble_instruction(
    instr: &Instruction,
    handler: &Handler,
    script: &ScriptChunk,
    names: &ScriptNamesChunk,
) -> DisassembledLine {
    let mnemonic = instr.opcode.mnemonic();
    let operand = match instr.opcode {
        Opcode::Jmp | Opcode::JmpIfZ | Opcode::EndRepeat => {
            let target = instr.offset as i64 + instr.argument;
            Some(format!("-> [{target}]"))
        }
        Opcode::GetGlobal | Opcode::SetGlobal | Opcode::GetProp | Opcode::SetProp => {
            Some(resolve_name(names, instr.argument))
        }
        Opcode::GetObjProp | Opcode::SetObjProp | Opcode::PushSymb | Opcode::Call => {
            Some(resolve_name(names, instr.argument))
        }
        Opcode::GetParam | Opcode::SetParam => {
            Some(resolve_id_list(names, &handler.arg_name_ids, instr.argument))
        }
        Opcode::GetLocal | Opcode::SetLocal => {
            Some(resolve_id_list(names, &handler.local_name_ids, instr.argument))
        }
        Opcode::PushString => Some(resolve_literal(script, instr.argument)),
        Opcode::PushInt8 | Opcode::PushInt16 | Opcode::PushInt32 => Some(instr.argument.to_string()),
        Opcode::PushFloat32 => Some(resolve_literal(script, instr.argument)),
        Opcode::Unknown(raw) => Some(format!("(raw=0x{raw:02X} arg={})", instr.argument)),
        _ => None,
    };

    DisassembledLine { offset: instr.offset, mnemonic, operand }
}

fn resolve_name(names: &ScriptNamesChunk, index: i64) -> String {
    if index < 0 {
        return format!("<invalid:{index}>");
    }
    names.name_at(index as u32)
}

fn resolve_id_list(names: &ScriptNamesChunk, ids: &[u32], index: i64) -> String {
    if index < 0 {
        return format!("<invalid:{index}>");
    }
    match ids.get(index as usize) {
        Some(&id) => names.name_at(id),
        None => format!("<unknown:{index}>"),
    }
}

fn resolve_literal(script: &ScriptChunk, index: i64) -> String {
    if index < 0 {
        return format!("<invalid:{index}>");
    }
    match script.literals.get(index as usize) {
        Some(Literal::Str(s)) => format!("{s:?}"),
        Some(Literal::Int(i)) => i.to_string(),
        Some(Literal::Float(f)) => f.to_string(),
        Some(Literal::Other(bytes)) => format!("<{} raw bytes>", bytes.len()),
        None => format!("<unknown literal:{index}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::opcode::decode_instructions;

    fn names_with(entries: &[&str]) -> ScriptNamesChunk {
        ScriptNamesChunk { names: entries.iter().map(|s| s.to_string()).collect() }
    }

    fn handler_with_bytecode(bytecode: &[u8]) -> Handler {
        Handler {
            name_id: 0,
            arg_name_ids: vec![],
            local_name_ids: vec![],
            bytecode_offset: 0,
            bytecode_length: bytecode.len() as u32,
            instructions: decode_instructions(bytecode, 0),
        }
    }

    #[test]
    fn jump_operand_prints_absolute_target() {
        // JMP (0x51) with a 1-byte argument of -2, at offset 0: target = 0 + (-2) = -2.
        let bytecode = [0x51u8, 0xFE];
        let handler = handler_with_bytecode(&bytecode);
        let script = ScriptChunk { handlers: vec![], properties: vec![], globals: vec![], literals: vec![] };
        let names = names_with(&[]);
        let lines = disassemble_handler(&handler, &script, &names);
        assert_eq!(lines[0].operand.as_deref(), Some("-> [-2]"));
    }

    #[test]
    fn get_global_resolves_through_names_table() {
        let bytecode = [0x49u8, 0x00]; // GET_GLOBAL arg=0
        let handler = handler_with_bytecode(&bytecode);
        let script = ScriptChunk { handlers: vec![], properties: vec![], globals: vec![], literals: vec![] };
        let names = names_with(&["myGlobal"]);
        let lines = disassemble_handler(&handler, &script, &names);
        assert_eq!(lines[0].operand.as_deref(), Some("myGlobal"));
    }

    #[test]
    fn ret_has_no_operand() {
        let handler = handler_with_bytecode(&[0x03]);
        let script = ScriptChunk { handlers: vec![], properties: vec![], globals: vec![], literals: vec![] };
        let names = names_with(&[]);
        let lines = disassemble_handler(&handler, &script, &names);
        assert_eq!(lines[0].to_string(), "[0] RET");
    }
}
