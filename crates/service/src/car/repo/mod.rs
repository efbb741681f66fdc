pub mod seaorm;

pub use seaorm::SeaOrmCarRepository;
