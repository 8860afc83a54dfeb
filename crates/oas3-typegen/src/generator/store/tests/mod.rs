mod operation_state;
mod statements;
