mod consensus;

mod handlers;
