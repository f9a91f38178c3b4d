//! Hybrid course recommendation.
//!
//! This module combines two independent rankings of courses:
//! - **Content-based**: TF-IDF vectors of course text, compared by cosine similarity
//! - **Collaborative**: user rating rows, compared by cosine distance (kNN)
//!
//! # Architecture
//!
//! - `vectorize`: TF-IDF model and sparse vectors
//! - `stopwords`: English stop word list
//! - `similarity`: precomputed course × course similarity matrix
//! - `interactions`: sparse user × item rating matrix
//! - `neighbors`: nearest-neighbor query contract and brute-force index
//! - `merge`: weighted, order-preserving merge of ranked lists
//! - `model`: immutable model built once from the dataset
//! - `ranker`: query-time orchestration
//!
//! # Usage
//!
//! ```
//! use coursemind_core::dataset::{read_merged_csv, UserId};
//! use coursemind_core::recommend::{HybridRanker, RecommendOptions, RecommendationModel};
//!
//! let csv = "user_id,item_id,rating,course_title,course_difficulty,course_Certificate_type\n\
//!            u1,1,5.0,Python Basics,Beginner,None\n\
//!            u1,2,3.0,Advanced Python,Advanced,Professional\n\
//!            u2,1,4.0,Python Basics,Beginner,None\n";
//! let model = RecommendationModel::from_raw(read_merged_csv(csv.as_bytes()).unwrap());
//! let ranker = HybridRanker::new(&model);
//!
//! let titles = ranker
//!     .recommend(&UserId::from("u1"), "python basics", RecommendOptions::default())
//!     .unwrap();
//! assert!(titles.len() <= 5);
//! ```

pub mod interactions;
pub mod merge;
pub mod model;
pub mod neighbors;
pub mod ranker;
pub mod similarity;
pub mod stopwords;
pub mod vectorize;

pub use interactions::{InteractionMatrix, SparseRow};
pub use model::{normalize_title, RecommendationModel};
pub use neighbors::{BruteForceIndex, Neighbor, NeighborSearch};
pub use ranker::{HybridRanker, RecommendOptions};
pub use similarity::CourseSimilarityMatrix;
pub use vectorize::{SparseVector, TfidfVectorizer};
