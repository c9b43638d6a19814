mod board;
mod priority;
mod task;
