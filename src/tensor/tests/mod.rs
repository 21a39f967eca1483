mod broadcast;
mod print;
mod reduce;
