//! The algorithm catalog: seven classic algorithms with human-readable
//! descriptions and the task types they support.
//!
//! The catalog is purely descriptive. Every entry trains through the same
//! mock predictors; the selection only affects labels and which task
//! types a configuration accepts.

use serde::Serialize;
use tabula_processing::TaskType;

/// Which task types an algorithm can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmTask {
    Regression,
    Classification,
    Both,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Algorithm {
    pub name: &'static str,
    pub task: AlgorithmTask,
    pub description: &'static str,
}

impl Algorithm {
    /// Whether this algorithm can train on the given task type.
    pub fn supports(&self, task_type: TaskType) -> bool {
        match self.task {
            AlgorithmTask::Both => true,
            AlgorithmTask::Regression => task_type == TaskType::Regression,
            AlgorithmTask::Classification => task_type == TaskType::Classification,
        }
    }
}

const CATALOG: [Algorithm; 7] = [
    Algorithm {
        name: "Linear Regression",
        task: AlgorithmTask::Regression,
        description: "Predicts continuous values by finding the best linear relationship between features and target. Good for: House price prediction, Sales forecasting, Risk assessment",
    },
    Algorithm {
        name: "Logistic Regression",
        task: AlgorithmTask::Classification,
        description: "Binary and multi-class classification using logistic function for probability estimation. Good for: Email spam detection, Medical diagnosis, Customer churn prediction",
    },
    Algorithm {
        name: "Decision Tree",
        task: AlgorithmTask::Both,
        description: "Tree-like model that makes decisions based on feature values, easy to interpret. Good for: Credit approval, Medical diagnosis, Feature selection",
    },
    Algorithm {
        name: "Random Forest",
        task: AlgorithmTask::Both,
        description: "Ensemble method combining multiple decision trees for improved accuracy and reduced overfitting. Good for: Image recognition, Bioinformatics, E-commerce recommendations",
    },
    Algorithm {
        name: "Support Vector Machine",
        task: AlgorithmTask::Both,
        description: "Finds optimal hyperplane to separate classes or predict continuous values, effective in high dimensions. Good for: Text classification, Image recognition, Gene classification",
    },
    Algorithm {
        name: "K-Nearest Neighbors",
        task: AlgorithmTask::Both,
        description: "Makes predictions based on the K nearest neighbors in the feature space. Good for: Recommendation systems, Pattern recognition, Outlier detection",
    },
    Algorithm {
        name: "Naive Bayes",
        task: AlgorithmTask::Classification,
        description: "Probabilistic classifier based on Bayes theorem, assumes feature independence. Good for: Text classification, Spam filtering, Sentiment analysis",
    },
];

/// All catalog entries, in display order.
pub fn all() -> &'static [Algorithm] {
    &CATALOG
}

/// Look up an algorithm by its exact display name.
pub fn find(name: &str) -> Option<&'static Algorithm> {
    CATALOG.iter().find(|a| a.name == name)
}

/// The entries applicable to one task type, preserving display order.
pub fn for_task(task_type: TaskType) -> Vec<&'static Algorithm> {
    CATALOG.iter().filter(|a| a.supports(task_type)).collect()
}
