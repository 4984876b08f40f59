/*!
  Control-plane codec and device multiplexer for a RINA IPC Process
  stack.

  This crate reimplements the hard core of the interconnect between the
  in-kernel IPC Process manager and the user-space IPC/application
  daemons: a table-driven codec for the ~70 control-message variants
  those components exchange ([`codec`], [`message`]), and the character
  device multiplexer that routes those messages between endpoints and an
  in-process handler table ([`device`]). See `DESIGN.md` for the
  grounding of each piece against the corpus this crate was built from.
*/
#![warn(missing_docs)]

pub mod codec;
pub mod device;
pub mod message;
