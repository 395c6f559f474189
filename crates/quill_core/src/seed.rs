//! Demo catalog seed.
//!
//! Populates an empty store with the sample posts, comments and accounts
//! used by the CLI and the seeded-store tests. Posts are appended in listing
//! order so the first seeded post is the first listed. Seeded slugs are
//! derived from titles the same way edits derive them, so a seeded post keeps
//! its URL across an edit that leaves the title alone.

use crate::model::post::{slug_base, PostId};
use crate::model::user::{NewUser, UserRole};
use crate::repo::comment_repo::{CommentRecord, CommentRepository, SqliteCommentRepository};
use crate::repo::post_repo::{
    Placement, PostRecord, PostRepository, RepoResult, SqlitePostRepository,
};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use log::info;
use rusqlite::Connection;

struct SeedPost {
    title: &'static str,
    author: &'static str,
    published_at: i64,
    category: &'static str,
    tags: &'static [&'static str],
    excerpt: &'static str,
    content: &'static str,
    featured: bool,
    views: u64,
}

struct SeedComment {
    post: usize,
    author: &'static str,
    created_at: i64,
    content: &'static str,
    approved: bool,
}

const SEED_POSTS: &[SeedPost] = &[
    SeedPost {
        title: "The Future of AI in Web Development",
        author: "Alice Wonderland",
        published_at: 1_698_314_400_000,
        category: "Technology",
        tags: &["AI", "Web Development", "Future"],
        excerpt: "Artificial Intelligence is rapidly changing the landscape of web development, offering tools that automate tasks, enhance user experiences, and even generate code. This post explores the exciting possibilities and potential challenges.",
        content: "<p>Artificial Intelligence (AI) is no longer a futuristic concept but a tangible force actively shaping various industries, including web development.</p>\
<h3>Automated Code Generation and Optimization</h3>\
<p>AI-powered tools can generate code snippets or entire components from natural language descriptions or design mockups.</p>\
<h3>Enhanced User Experience with Personalization</h3>\
<p>Machine learning models can adjust content, recommendations and even the UI layout to individual users.</p>\
<h3>Challenges and Ethical Considerations</h3>\
<p>Data privacy, algorithmic bias and job displacement concerns must be addressed responsibly.</p>",
        featured: true,
        views: 1250,
    },
    SeedPost {
        title: "Mastering React Hooks: A Comprehensive Guide",
        author: "Bob The Builder",
        published_at: 1_697_812_200_000,
        category: "Programming",
        tags: &["React", "Hooks", "JavaScript"],
        excerpt: "React Hooks have transformed the way we write functional components, making state management and side effects much cleaner. This guide dives deep into common hooks and best practices.",
        content: "<p>React Hooks, introduced in React 16.8, have fundamentally changed how we approach state management and side effects in functional components.</p>\
<h3>useState: Managing Component State</h3>\
<p>The <code>useState</code> hook returns a stateful value and a function to update it.</p>\
<h3>useEffect: Handling Side Effects</h3>\
<p><code>useEffect</code> manages data fetching, subscriptions and manual DOM changes; the dependency array controls when it re-runs.</p>\
<h3>Custom Hooks: Reusability at its Best</h3>\
<p>Custom hooks encapsulate reusable stateful logic into separate, testable units.</p>",
        featured: false,
        views: 980,
    },
    SeedPost {
        title: "A Beginner's Guide to Tailwind CSS",
        author: "Charlie Chaplin",
        published_at: 1_697_361_300_000,
        category: "Web Design",
        tags: &["CSS", "Tailwind", "Frontend"],
        excerpt: "Tailwind CSS is a utility-first CSS framework that allows you to build custom designs directly in your markup. This guide helps beginners get started.",
        content: "<p>Tailwind CSS is a utility-first CSS framework that streamlines the process of building custom designs.</p>\
<h3>The Utility-First Approach</h3>\
<p>Apply classes like <code>flex</code>, <code>pt-4</code> and <code>text-center</code> directly to your HTML elements.</p>\
<h3>Rapid Prototyping and Consistency</h3>\
<p>A consistent set of utility classes keeps designs visually consistent across a large team.</p>\
<h3>Integration with React and Other Frameworks</h3>\
<p>Utility classes apply directly to JSX or template syntax.</p>",
        featured: true,
        views: 800,
    },
    SeedPost {
        title: "Exploring the Wonders of Quantum Computing",
        author: "Dr. Strange",
        published_at: 1_696_071_600_000,
        category: "Science",
        tags: &["Physics", "Quantum", "Technology"],
        excerpt: "Quantum computing promises to solve problems intractable for classical computers. Delve into the fascinating world of qubits, superposition, and entanglement.",
        content: "<p>Quantum computing leverages the principles of quantum mechanics to process information in fundamentally new ways.</p>\
<h3>Qubits, Superposition, and Entanglement</h3>\
<p>A qubit can be a combination of 0 and 1 at the same time, and entangled qubits influence each other regardless of distance.</p>\
<h3>Potential Applications</h3>\
<p>Drug discovery, materials research, cryptography and logistics optimization.</p>\
<h3>Challenges on the Road Ahead</h3>\
<p>Stable qubits need ultra-low temperatures, and error correction remains a major hurdle.</p>",
        featured: false,
        views: 650,
    },
    SeedPost {
        title: "Healthy Eating Habits for a Productive Lifestyle",
        author: "Chef Gordon",
        published_at: 1_695_628_800_000,
        category: "Health",
        tags: &["Nutrition", "Wellness", "Lifestyle"],
        excerpt: "Fuel your body and mind with smart food choices. Discover practical tips for maintaining healthy eating habits and boosting your productivity.",
        content: "<p>Maintaining healthy eating habits is crucial for physical well-being, cognitive function and overall productivity.</p>\
<h3>Balanced Meals for Sustained Energy</h3>\
<p>Mix complex carbohydrates, lean proteins and healthy fats.</p>\
<h3>Hydration is Key</h3>\
<p>Dehydration leads to fatigue, reduced concentration and headaches.</p>\
<h3>Mindful Eating Practices</h3>\
<p>Eat slowly, savor your food and avoid screens while eating.</p>",
        featured: true,
        views: 700,
    },
    SeedPost {
        title: "The Art of Photography: Capturing Moments",
        author: "Ansel Adams Jr.",
        published_at: 1_695_228_300_000,
        category: "Art & Culture",
        tags: &["Photography", "Art", "Creative"],
        excerpt: "Photography is more than just taking pictures; it's about telling stories and preserving memories. Learn fundamental techniques and creative approaches.",
        content: "<p>Photography is a powerful medium for artistic expression that blends technical skill with creative vision.</p>\
<h3>Understanding Light and Composition</h3>\
<p>The rule of thirds, leading lines and framing guide the viewer's eye.</p>\
<h3>Technical Skills and Gear</h3>\
<p>Aperture, shutter speed and ISO control exposure, depth of field and motion blur.</p>\
<h3>Developing Your Unique Style</h3>\
<p>Style develops through practice, experimentation and reflection.</p>",
        featured: false,
        views: 400,
    },
];

const SEED_COMMENTS: &[SeedComment] = &[
    SeedComment {
        post: 0,
        author: "John Doe",
        created_at: 1_698_319_800_000,
        content: "Great insights on AI! Looking forward to seeing more development in this area.",
        approved: true,
    },
    SeedComment {
        post: 0,
        author: "Jane Smith",
        created_at: 1_698_321_600_000,
        content: "Do you think AI will eventually replace web developers entirely?",
        approved: true,
    },
    SeedComment {
        post: 1,
        author: "Peter Jones",
        created_at: 1_697_878_800_000,
        content: "This guide was incredibly helpful, especially the useEffect section!",
        approved: true,
    },
    SeedComment {
        post: 2,
        author: "Sarah Lee",
        created_at: 1_697_450_400_000,
        content: "Tailwind has changed my workflow for the better. Highly recommend!",
        approved: false,
    },
    SeedComment {
        post: 2,
        author: "Mark Johnson",
        created_at: 1_697_454_000_000,
        content: "I find Tailwind a bit too verbose in the HTML. Any tips for managing that?",
        approved: true,
    },
];

const SEED_USERS: &[(&str, &str, UserRole)] = &[
    ("admin", "admin@example.com", UserRole::Administrator),
    ("editor", "editor@example.com", UserRole::Editor),
    ("reader", "reader@example.com", UserRole::Reader),
];

/// Inserts the demo catalog into a freshly migrated, empty database.
///
/// Seeded posts receive ids 1..=6 in listing order, which lines up with the
/// default featured allow-list.
pub fn seed_demo_catalog(conn: &Connection) -> RepoResult<()> {
    let posts = SqlitePostRepository::new(conn);
    let mut post_ids: Vec<PostId> = Vec::with_capacity(SEED_POSTS.len());
    for (index, seed) in SEED_POSTS.iter().enumerate() {
        let record = PostRecord {
            slug: slug_base(seed.title),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            published_at: seed.published_at,
            category: seed.category.to_string(),
            tags: seed.tags.iter().map(|tag| (*tag).to_string()).collect(),
            excerpt: seed.excerpt.to_string(),
            content: seed.content.to_string(),
            image_url: format!("https://picsum.photos/1200/600?random={}", index + 1),
            featured: seed.featured,
            views: seed.views,
        };
        post_ids.push(posts.insert_post(&record, Placement::Back)?);
    }

    let comments = SqliteCommentRepository::new(conn);
    for seed in SEED_COMMENTS {
        comments.insert_comment(&CommentRecord {
            post_id: post_ids[seed.post],
            author: seed.author.to_string(),
            created_at: seed.created_at,
            content: seed.content.to_string(),
            approved: seed.approved,
        })?;
    }

    let users = SqliteUserRepository::new(conn);
    for (username, email, role) in SEED_USERS {
        users.insert_user(&NewUser::new(*username, *email, *role))?;
    }

    info!(
        "event=seed_apply module=catalog status=ok posts={} comments={} users={}",
        SEED_POSTS.len(),
        SEED_COMMENTS.len(),
        SEED_USERS.len()
    );
    Ok(())
}
