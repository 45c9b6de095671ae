//! Asset decoders layered on top of the raw chunk model: turning a `BITD`
//! payload into pixels, a `snd_` payload into a playable WAV, and a
//! `Script` handler's bytecode into readable mnemonics (spec §4.3).

pub mod bitmap;
pub mod disassemble;
pub mod sound;
