// 頁面內嵌的樣式與腳本，產生的 HTML 不依賴任何外部樣式檔

pub const FONT_IMPORT: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;700&family=Playfair+Display:wght@400;700&family=Kalam&display=swap";

pub const STYLESHEET: &str = r#"
:root {
  --ivory: #fdfdfb;
  --charcoal: #333333;
  --stone-500: #78716c;
  --stone-600: #57534e;
  --gradient-start: #fdfdfb;
  --gradient-end: #fff0f5;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: 'Inter', sans-serif;
  color: var(--charcoal);
  background: linear-gradient(135deg, var(--gradient-start), var(--gradient-end));
  background-size: 200% 200%;
  animation: gradient-shift 15s ease infinite;
  line-height: 1.6;
}
@keyframes gradient-shift {
  0% { background-position: 0% 50%; }
  50% { background-position: 100% 50%; }
  100% { background-position: 0% 50%; }
}
h1, h2, h3 { font-family: 'Playfair Display', serif; font-weight: 700; }
h2 { font-size: 2rem; text-align: center; margin-bottom: 2rem; }
section { padding: 3rem 1rem; max-width: 64rem; margin: 0 auto; }
.hero {
  min-height: 80vh;
  display: flex;
  align-items: center;
  justify-content: center;
  text-align: center;
}
.hero h1 { font-size: 3.5rem; margin-bottom: 1.5rem; }
.hero .from { font-size: 1.5rem; margin-bottom: 2rem; }
.hero-message { font-family: 'Kalam', cursive; font-size: 1.75rem; margin: 3rem 0; }
.main-media figure {
  margin: 0;
  background: white;
  border-radius: 12px;
  box-shadow: 0 20px 25px rgba(0, 0, 0, 0.1);
  overflow: hidden;
}
.main-media img { display: block; width: 100%; max-height: 80vh; object-fit: cover; }
.main-media figcaption { padding: 1.5rem; text-align: center; font-size: 1.125rem; color: var(--stone-600); }
.gallery-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
  gap: 2rem;
}
.gallery-item img {
  width: 100%;
  height: 300px;
  object-fit: cover;
  border-radius: 8px;
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
  transition: transform 0.3s ease;
}
.gallery-item img:hover { transform: scale(1.03); }
.caption { margin-top: 0.5rem; color: var(--stone-600); font-style: italic; }
.highlight-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
  gap: 1.5rem;
}
.highlight-card {
  background: white;
  padding: 1.5rem;
  border-radius: 8px;
  box-shadow: 0 2px 4px rgba(0, 0, 0, 0.05);
  transition: transform 0.3s ease, box-shadow 0.3s ease;
}
.highlight-card:hover { transform: translateY(-5px); box-shadow: 0 10px 20px rgba(0, 0, 0, 0.1); }
.descriptor-cloud { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; }
.descriptor-tag {
  padding: 0.5rem 1rem;
  background: white;
  border-radius: 9999px;
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
  font-size: 1.125rem;
  font-weight: 500;
}
.future-plans { max-width: 48rem; margin: 0 auto; font-size: 1.125rem; }
.future-plans li { margin-bottom: 1rem; }
.capsule {
  max-width: 48rem;
  margin: 0 auto;
  text-align: center;
  background: white;
  padding: 2rem;
  border-radius: 12px;
  box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
}
.unlock-date { font-size: 0.875rem; color: var(--stone-500); }
footer { padding: 3rem 1rem; text-align: center; }
.attribution { font-size: 1.125rem; margin-bottom: 1rem; }
.closing-secret {
  display: inline-block;
  margin-top: 2rem;
  padding: 1rem;
  background: rgba(255, 255, 255, 0.5);
  border-radius: 8px;
  font-family: 'Kalam', cursive;
  font-size: 1.25rem;
}
.year { font-size: 0.875rem; color: var(--stone-500); text-align: center; padding-bottom: 2rem; }
.js .fade-in { opacity: 0; transform: translateY(20px); transition: opacity 0.6s ease, transform 0.6s ease; }
@media (max-width: 768px) {
  .hero h1 { font-size: 2.25rem; }
  .gallery-grid, .highlight-grid { grid-template-columns: 1fr; }
}
"#;

// 只有腳本真的執行時才隱藏 .fade-in 區塊
pub const SCRIPT: &str = r#"
document.documentElement.classList.add('js');
document.addEventListener('DOMContentLoaded', () => {
  const fadeElements = document.querySelectorAll('.fade-in');
  const reveal = () => {
    fadeElements.forEach((element) => {
      if (element.getBoundingClientRect().top < window.innerHeight - 100) {
        element.style.opacity = 1;
        element.style.transform = 'translateY(0)';
      }
    });
  };
  reveal();
  window.addEventListener('scroll', reveal);
});
"#;
