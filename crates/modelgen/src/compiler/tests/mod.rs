mod arena;
mod builder;
