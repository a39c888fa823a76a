//! Built-in quote data, eight per phase.

use crate::types::TimePhase;

pub(super) const DAWN: &[&str] = &[
    "The sun is new each day. — Heraclitus",
    "Every morning we are born again. What we do today is what matters most. — Buddha",
    "Dawn is the time when nothing breathes, the hour of silence. — Unknown",
    "Write it on your heart that every day is the best day in the year. — Ralph Waldo Emerson",
    "The breeze at dawn has secrets to tell you. Don't go back to sleep. — Rumi",
    "An early-morning walk is a blessing for the whole day. — Henry David Thoreau",
    "Lose an hour in the morning, and you will spend all day looking for it. — Richard Whately",
    "Morning is an important time of day, because how you spend your morning can often tell you what kind of day you are going to have. — Lemony Snicket",
];

pub(super) const MORNING: &[&str] = &[
    "The secret of getting ahead is getting started. — Mark Twain",
    "Well begun is half done. — Aristotle",
    "Either you run the day, or the day runs you. — Jim Rohn",
    "Quality is not an act, it is a habit. — Aristotle",
    "It does not matter how slowly you go as long as you do not stop. — Confucius",
    "Action is the foundational key to all success. — Pablo Picasso",
    "The way to get started is to quit talking and begin doing. — Walt Disney",
    "Small deeds done are better than great deeds planned. — Peter Marshall",
];

pub(super) const MIDDAY: &[&str] = &[
    "Simplicity is the ultimate sophistication. — Leonardo da Vinci",
    "Focus is a matter of deciding what things you're not going to do. — John Carmack",
    "Make it work, make it right, make it fast. — Kent Beck",
    "Nothing is particularly hard if you divide it into small jobs. — Henry Ford",
    "Energy and persistence conquer all things. — Benjamin Franklin",
    "Perfection is achieved not when there is nothing more to add, but when there is nothing left to take away. — Antoine de Saint-Exupéry",
    "You miss 100% of the shots you don't take. — Wayne Gretzky",
    "Done is better than perfect. — Sheryl Sandberg",
];

pub(super) const AFTERNOON: &[&str] = &[
    "Rest when you're weary. Refresh and renew yourself. — Ralph Marston",
    "Almost everything will work again if you unplug it for a few minutes, including you. — Anne Lamott",
    "The best way out is always through. — Robert Frost",
    "Patience is bitter, but its fruit is sweet. — Jean-Jacques Rousseau",
    "Great things are done by a series of small things brought together. — Vincent van Gogh",
    "Continuous effort, not strength or intelligence, is the key to unlocking our potential. — Winston Churchill",
    "A river cuts through rock not because of its power, but because of its persistence. — Jim Watkins",
    "Keep your face always toward the sunshine, and shadows will fall behind you. — Walt Whitman",
];

pub(super) const EVENING: &[&str] = &[
    "Finish each day and be done with it. — Ralph Waldo Emerson",
    "The day is over, the night has come. Today is gone. What's done is done. — Unknown",
    "Every sunset brings the promise of a new dawn. — Ralph Waldo Emerson",
    "What did you do today that made you feel proud? — Unknown",
    "Reflect upon your present blessings, of which every man has plenty. — Charles Dickens",
    "In the end, it's not the years in your life that count. It's the life in your years. — Abraham Lincoln",
    "The evening's the best part of the day. You've done your day's work. — Kazuo Ishiguro",
    "Twilight drops her curtain down, and pins it with a star. — Lucy Maud Montgomery",
];

pub(super) const NIGHT: &[&str] = &[
    "The night is more alive and more richly colored than the day. — Vincent van Gogh",
    "Sleep is the best meditation. — Dalai Lama",
    "Night is the other half of life, and the better half. — Johann Wolfgang von Goethe",
    "The darker the night, the brighter the stars. — Fyodor Dostoevsky",
    "Each night, when I go to sleep, I die. And the next morning, when I wake up, I am reborn. — Mahatma Gandhi",
    "I have loved the stars too fondly to be fearful of the night. — Sarah Williams",
    "Tomorrow is a new day with no mistakes in it yet. — L. M. Montgomery",
    "A good laugh and a long sleep are the best cures in the doctor's book. — Irish proverb",
];

/// Quotes for a phase from the built-in data.
pub(super) fn for_phase(phase: TimePhase) -> &'static [&'static str] {
    match phase {
        TimePhase::Dawn => DAWN,
        TimePhase::Morning => MORNING,
        TimePhase::Midday => MIDDAY,
        TimePhase::Afternoon => AFTERNOON,
        TimePhase::Evening => EVENING,
        TimePhase::Night => NIGHT,
    }
}
