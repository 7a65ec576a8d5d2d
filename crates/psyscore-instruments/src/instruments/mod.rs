pub mod adhd_rs;
pub mod asrs;
pub mod caars;
pub mod cat_q;
pub mod diva5;
pub mod wechsler;
pub mod wurs;
